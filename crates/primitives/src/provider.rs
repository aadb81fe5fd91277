//! Utils for creating alloy providers

use crate::Wallet;
use alloy::providers::{Provider, ProviderBuilder};
use std::time::Duration;

/// Creates a read-only alloy provider with HTTP connection
pub fn create_http_provider(addr: &str) -> eyre::Result<impl Provider + Clone> {
    let provider = ProviderBuilder::new().connect_http(addr.parse()?);
    Ok(provider)
}

/// Creates an alloy provider with HTTP connection that signs transactions with the wallet
///
/// Nonce, gas and chain id of outgoing transactions are filled by the provider.
pub fn create_http_signer_provider(
    addr: &str,
    wallet: &Wallet,
    poll_interval: Duration,
) -> eyre::Result<impl Provider + Clone> {
    let provider = ProviderBuilder::new().wallet(wallet.signer.clone()).connect_http(addr.parse()?);
    provider.client().set_poll_interval(poll_interval);
    Ok(provider)
}
