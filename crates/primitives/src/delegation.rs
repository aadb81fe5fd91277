//! EIP-7702 delegation designator (`0xef0100 || address`) helpers
use crate::{
    constants::delegation::{DESIGNATOR_LENGTH, DESIGNATOR_PREFIX},
    get_address,
    utils::as_checksum_address,
};
use alloy::primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the code of an account says about its delegation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status", content = "address")]
pub enum DelegationStatus {
    /// Plain EOA without code (or delegated to the zero address)
    NotDelegated,
    /// EOA delegated to the contract at the address
    Delegated(#[serde(serialize_with = "as_checksum_address")] Address),
    /// Account holds regular contract code
    Contract,
}

impl fmt::Display for DelegationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotDelegated => write!(f, "not delegated"),
            Self::Delegated(address) => write!(f, "delegated to {address}"),
            Self::Contract => write!(f, "contract account"),
        }
    }
}

pub struct Delegation;

impl Delegation {
    /// Code installed on an account delegated to `address`
    pub fn designator(address: Address) -> Bytes {
        [DESIGNATOR_PREFIX.as_slice(), address.as_slice()].concat().into()
    }

    /// Parses the code of an account
    ///
    /// # Arguments
    /// * `code` - Code of the account as returned by `eth_getCode`
    ///
    /// # Returns
    /// * `DelegationStatus` - Status of the account
    pub fn parse_from_code(code: &[u8]) -> DelegationStatus {
        if code.is_empty() {
            return DelegationStatus::NotDelegated;
        }

        if code.len() != DESIGNATOR_LENGTH || !code.starts_with(&DESIGNATOR_PREFIX) {
            return DelegationStatus::Contract;
        }

        match get_address(&code[DESIGNATOR_PREFIX.len()..]) {
            Some(address) if !address.is_zero() => DelegationStatus::Delegated(address),
            _ => DelegationStatus::NotDelegated,
        }
    }
}
