//! EIP-7702 delegation primitive types
//!
//! This crate contains the call planner used to batch smart wallet calls, EIP-7702 delegation
//! helpers and the local wallet that signs authorizations.

mod call;
pub mod chain;
pub mod constants;
mod delegation;
pub mod provider;
mod utils;
mod wallet;

pub use call::{Call, CallPlanner, InvalidCallError};
pub use delegation::{Delegation, DelegationStatus};
pub use utils::{as_checksum_address, as_decimal_string, get_address, preview};
pub use wallet::{AuthorizationExecutor, Wallet};
