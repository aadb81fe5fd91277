use crate::utils::{parse_address, parse_chain, parse_duration, parse_u256, validate_private_key};
use alloy::primitives::{Address, U256};
use alloy_chains::Chain;
use clap::Parser;
use delegator_contracts::{ExecuteOptions, NativeSwap};
use delegator_primitives::{
    constants::universal_router::{DEADLINE, POOL_FEE, ROUTER, UNI, WETH},
    Wallet,
};
use expanded_pathbuf::ExpandedPathBuf;
use std::time::Duration;

/// Ethereum execution client CLI args
#[derive(Debug, Clone, Parser, PartialEq)]
pub struct EthClientArgs {
    /// Ethereum execution client RPC endpoint.
    #[clap(long, env = "RPC_URL")]
    pub rpc_url: String,

    /// Chain the endpoint is expected to serve (name or id).
    ///
    /// If set, commands fail when the endpoint reports a different chain.
    #[clap(long, value_parser = parse_chain)]
    pub chain: Option<Chain>,

    /// Poll interval of transaction receipts in milliseconds.
    #[clap(long, default_value = "1000", value_parser = parse_duration)]
    pub poll_interval: Duration,

    /// Return as soon as the transaction is sent, without waiting for its receipt.
    #[clap(long)]
    pub no_wait: bool,
}

/// Wallet CLI args
#[derive(Debug, Clone, Parser)]
pub struct WalletArgs {
    /// Private key of the EOA (hex encoded).
    #[clap(long, env = "PRIVATE_KEY", hide_env_values = true, value_parser = validate_private_key)]
    pub private_key: Option<String>,

    /// Path to the mnemonic file. Takes precedence over the private key.
    #[clap(long)]
    pub mnemonic_file: Option<ExpandedPathBuf>,
}

impl WalletArgs {
    /// Loads the wallet of the EOA
    pub fn wallet(&self) -> eyre::Result<Wallet> {
        match (&self.mnemonic_file, &self.private_key) {
            (Some(path), _) => Wallet::from_file(path.clone()),
            (None, Some(key)) => Wallet::from_key(key),
            (None, None) => Err(eyre::eyre!("Either --private-key or --mnemonic-file is required")),
        }
    }
}

/// Batch execution CLI args
#[derive(Debug, Clone, Parser, PartialEq)]
pub struct ExecuteArgs {
    /// Keep executing the batch when one of its calls fails.
    ///
    /// By default, a failing call reverts the whole batch.
    #[clap(long)]
    pub allow_failure: bool,
}

impl ExecuteArgs {
    pub fn options(&self) -> ExecuteOptions {
        ExecuteOptions { revert_on_failure: !self.allow_failure }
    }
}

/// Universal Router swap CLI args
#[derive(Debug, Clone, Parser, PartialEq)]
pub struct SwapArgs {
    /// Amount of native currency to swap (in wei).
    #[clap(long, default_value = "10000000000000", value_parser = parse_u256)]
    pub amount_in: U256,

    /// Minimum amount of tokens to receive.
    #[clap(long, default_value = "0", value_parser = parse_u256)]
    pub amount_out_min: U256,

    /// Recipient of the swap fee.
    #[clap(long, value_parser = parse_address)]
    pub fee_recipient: Address,

    /// Portion of the output paid to the fee recipient (in basis points).
    #[clap(long, default_value = "25", value_parser = parse_u256)]
    pub fee_bips: U256,

    /// Token bought with the native currency.
    #[clap(long, default_value = UNI, value_parser = parse_address)]
    pub token_out: Address,

    /// Wrapped native currency.
    #[clap(long, default_value = WETH, value_parser = parse_address)]
    pub weth: Address,

    /// Universal Router address.
    #[clap(long, default_value = ROUTER, value_parser = parse_address)]
    pub router: Address,

    /// Fee tier of the pool.
    #[clap(long, default_value_t = POOL_FEE)]
    pub pool_fee: u32,

    /// Seconds until the swap expires.
    #[clap(long, default_value_t = DEADLINE)]
    pub deadline: u64,
}

impl SwapArgs {
    /// Swap paying the output to `recipient`
    pub fn native_swap(&self, recipient: Address) -> NativeSwap {
        NativeSwap {
            weth: self.weth,
            token_out: self.token_out,
            pool_fee: self.pool_fee,
            amount_in: self.amount_in,
            amount_out_min: self.amount_out_min,
            fee_recipient: self.fee_recipient,
            fee_bips: self.fee_bips,
            recipient,
        }
    }
}
