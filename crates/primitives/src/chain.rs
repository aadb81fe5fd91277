//! Chain extensions
use crate::constants::{smart_wallet, supported_chains};
use alloy::primitives::{Address, TxHash};
use alloy_chains::{Chain, NamedChain};
use lazy_static::lazy_static;
use std::{collections::HashMap, str::FromStr};

lazy_static! {
    /// Known smart wallet deployments per chain
    pub static ref SMART_WALLET_ADDRESSES: HashMap<NamedChain, Address> = {
        let address = Address::from_str(smart_wallet::ADDRESS).expect("Smart wallet address valid");
        supported_chains::CHAINS.iter().map(|chain| (*chain, address)).collect()
    };
}

pub trait ChainExt {
    /// Smart wallet implementation deployed on the chain, if any
    fn smart_wallet_address(&self) -> Option<Address>;

    /// Block explorer link of a transaction, if the chain has a known explorer
    fn explorer_tx_url(&self, hash: &TxHash) -> Option<String>;
}

impl ChainExt for Chain {
    fn smart_wallet_address(&self) -> Option<Address> {
        self.named().and_then(|chain| SMART_WALLET_ADDRESSES.get(&chain).copied())
    }

    fn explorer_tx_url(&self, hash: &TxHash) -> Option<String> {
        self.etherscan_urls().map(|(_, base)| format!("{}/tx/{hash}", base.trim_end_matches('/')))
    }
}
