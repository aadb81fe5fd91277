use alloy::{
    primitives::Bytes,
    sol_types::{Panic, Revert, SolError},
};
use delegator_primitives::InvalidCallError;
use thiserror::Error;

/// Smart wallet errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SmartWalletError {
    /// No known smart wallet deployment on the chain
    #[error("no smart wallet deployment on chain {chain_id}")]
    UnsupportedChain {
        /// The chain id
        chain_id: u64,
    },

    /// A call of the batch is invalid
    #[error(transparent)]
    InvalidCall(#[from] InvalidCallError),

    /// Calldata is not a batched call
    #[error("decode error: {inner}")]
    Decode {
        /// The inner error message
        inner: String,
    },

    /// Execution mode is not a batched mode
    #[error("unsupported execution mode {mode}")]
    UnsupportedMode {
        /// The mode word
        mode: String,
    },
}

/// Universal Router route errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// A path needs exactly one fee per hop
    #[error("path with {tokens} tokens cannot have {fees} fees")]
    PathLength {
        /// Number of tokens
        tokens: usize,
        /// Number of fees
        fees: usize,
    },

    /// Pool fees are encoded in 3 bytes
    #[error("fee {fee} does not fit in uint24")]
    FeeTooLarge {
        /// The fee
        fee: u32,
    },
}

/// Decodes `Error(string)` and `Panic(uint256)` revert payloads into a readable reason
pub fn decode_revert_string(data: &Bytes) -> Option<String> {
    if let Ok(revert) = Revert::abi_decode(data) {
        return Some(revert.reason);
    }

    Panic::abi_decode(data).ok().map(|panic| format!("panic code {}", panic.code))
}
