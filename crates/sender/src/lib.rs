//! Sender is a crate for signing EIP-7702 authorizations and sending the Type-4 transactions
//! that delegate an EOA to a smart wallet

mod client;
mod debug;
mod delegator;

pub use client::{EthClient, EthereumClient};
pub use debug::{
    log_execution_call, log_method_parameters, AuthorizationSummary, TransactionSummary,
};
pub use delegator::Delegator;
