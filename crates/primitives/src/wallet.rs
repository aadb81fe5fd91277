//! A `Wallet` is a wrapper around a local alloy signer that signs EIP-7702 authorizations
use crate::constants::wallet::DERIVATION_PATH;
use alloy::{
    eips::eip7702::{Authorization, SignedAuthorization},
    primitives::{Address, U256},
    signers::{
        local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner},
        SignerSync,
    },
};
use expanded_pathbuf::ExpandedPathBuf;
use serde::{Deserialize, Serialize};
use std::{fs, str::FromStr};
use strum_macros::{EnumString, VariantNames};
use tracing::debug;

/// Who submits the transaction carrying the authorization
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumString, VariantNames, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab_case")]
#[serde(rename_all = "kebab-case")]
pub enum AuthorizationExecutor {
    /// The authorizing EOA sends the transaction itself
    #[default]
    #[strum(serialize = "self")]
    #[serde(rename = "self")]
    SelfSponsored,
    /// Another account sends the transaction
    Relayer,
}

impl AuthorizationExecutor {
    /// Nonce the authorization has to carry given the current nonce of the authorizing account
    ///
    /// When the account sends the transaction itself, its nonce is bumped before the
    /// authorization list is processed, so the authorization must use the next nonce.
    /// Returns `None` if that nonce does not fit in a `u64`.
    pub fn authorization_nonce(&self, account_nonce: u64) -> Option<u64> {
        match self {
            Self::SelfSponsored => account_nonce.checked_add(1),
            Self::Relayer => Some(account_nonce),
        }
    }
}

/// Wrapper around a local alloy signer
#[derive(Clone, Debug)]
pub struct Wallet {
    /// Signing key of the wallet
    pub signer: PrivateKeySigner,
}

impl Wallet {
    /// Create a new wallet from a hex encoded private key (with or without `0x`)
    pub fn from_key(key: &str) -> eyre::Result<Self> {
        let signer = PrivateKeySigner::from_str(key.trim())?;
        Ok(Self { signer })
    }

    /// Create a new wallet from the given mnemonic phrase
    ///
    /// # Arguments
    /// * `phrase` - The mnemonic phrase
    ///
    /// # Returns
    /// * `Self` - A new `Wallet` instance for the first account of the phrase
    pub fn from_phrase(phrase: &str) -> eyre::Result<Self> {
        let signer = MnemonicBuilder::<English>::default()
            .phrase(phrase.trim())
            .derivation_path(DERIVATION_PATH)?
            .build()?;
        Ok(Self { signer })
    }

    /// Create a new wallet from the given file containing the mnemonic phrase
    pub fn from_file(path: ExpandedPathBuf) -> eyre::Result<Self> {
        let phrase = fs::read_to_string(path.to_path_buf())?;
        Self::from_phrase(&phrase)
    }

    /// Address of the EOA behind the wallet
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Signs an EIP-7702 authorization
    ///
    /// # Arguments
    /// * `contract` - The contract whose code the EOA delegates to
    /// * `chain_id` - The chain id the authorization is valid on
    /// * `nonce` - The nonce the authorization is valid for
    ///
    /// # Returns
    /// * `SignedAuthorization` - The signed authorization tuple
    pub fn sign_authorization(
        &self,
        contract: Address,
        chain_id: u64,
        nonce: u64,
    ) -> eyre::Result<SignedAuthorization> {
        let authorization =
            Authorization { chain_id: U256::from(chain_id), address: contract, nonce };
        let signature = self.signer.sign_hash_sync(&authorization.signature_hash())?;

        debug!("Signed authorization for {contract:?} on chain {chain_id} with nonce {nonce}");

        Ok(authorization.into_signed(signature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    // anvil account #0
    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const PHRASE: &str = "test test test test test test test test test test test junk";
    const ADDRESS: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");

    #[test]
    fn from_key_and_phrase() -> eyre::Result<()> {
        assert_eq!(Wallet::from_key(KEY)?.address(), ADDRESS);
        assert_eq!(Wallet::from_key(KEY.trim_start_matches("0x"))?.address(), ADDRESS);
        assert_eq!(Wallet::from_phrase(PHRASE)?.address(), ADDRESS);
        assert!(Wallet::from_key("0x1234").is_err());
        Ok(())
    }

    #[test]
    fn from_file() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("mnemonic");
        fs::write(&path, format!("{PHRASE}\n"))?;

        let wallet = Wallet::from_file(ExpandedPathBuf(path))?;
        assert_eq!(wallet.address(), ADDRESS);
        Ok(())
    }

    #[test]
    fn sign_authorization() -> eyre::Result<()> {
        let wallet = Wallet::from_key(KEY)?;
        let contract = address!("000000009b1d0af20d8c6d0a44e162d11f9b8f00");

        let signed = wallet.sign_authorization(contract, 11155111, 7)?;

        assert_eq!(signed.address, contract);
        assert_eq!(signed.nonce, 7);
        assert_eq!(signed.chain_id, U256::from(11155111));
        assert_eq!(signed.recover_authority()?, ADDRESS);
        Ok(())
    }

    #[test]
    fn authorization_nonce() {
        assert_eq!(AuthorizationExecutor::SelfSponsored.authorization_nonce(4), Some(5));
        assert_eq!(AuthorizationExecutor::Relayer.authorization_nonce(4), Some(4));
        assert_eq!(AuthorizationExecutor::SelfSponsored.authorization_nonce(u64::MAX), None);
        assert_eq!(AuthorizationExecutor::Relayer.authorization_nonce(u64::MAX), Some(u64::MAX));
        assert_eq!(
            AuthorizationExecutor::from_str("self").unwrap(),
            AuthorizationExecutor::SelfSponsored
        );
        assert_eq!(
            AuthorizationExecutor::from_str("relayer").unwrap(),
            AuthorizationExecutor::Relayer
        );
    }
}
