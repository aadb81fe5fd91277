//! Outbound calls and the planner that batches them for a smart wallet

use crate::utils::as_checksum_address;
use alloy::primitives::{Address, Bytes, I256, U256};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// A single call executed by the delegated smart wallet
#[derive(Default, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Call {
    /// Target account of the call
    #[serde(rename = "to", serialize_with = "as_checksum_address")]
    pub target: Address,

    /// Amount of native currency (in wei) attached to the call
    pub value: U256,

    /// Calldata passed to the target (may be empty)
    pub data: Bytes,
}

impl Call {
    pub fn new(target: Address, value: U256, data: Bytes) -> Self {
        Self { target, value, data }
    }

    /// Builds a call from untyped input
    ///
    /// # Arguments
    /// * `target` - The 20-byte target address as a hex string
    /// * `value` - Signed amount of wei, must not be negative
    /// * `data` - Hex encoded calldata (`0x` for none)
    ///
    /// # Returns
    /// * `Call` - The validated call, or [InvalidCallError](InvalidCallError) for malformed input
    pub fn parse(target: &str, value: I256, data: &str) -> Result<Self, InvalidCallError> {
        let target = Address::from_str(target.trim())
            .map_err(|_| InvalidCallError::Target { target: target.into() })?;

        if value.is_negative() {
            return Err(InvalidCallError::NegativeValue { value });
        }

        let data = Bytes::from_str(data.trim())
            .map_err(|_| InvalidCallError::Data { data: data.into() })?;

        Ok(Self { target, value: value.into_raw(), data })
    }
}

/// Reasons a call is rejected by the [CallPlanner](CallPlanner)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidCallError {
    /// Target is not a 20-byte hex address
    #[error("target {target:?} is not a valid address")]
    Target {
        /// The rejected input
        target: String,
    },

    /// Value is below zero
    #[error("value {value} is negative")]
    NegativeValue {
        /// The rejected input
        value: I256,
    },

    /// Data is not valid hex encoded bytes
    #[error("data {data:?} is not valid hex bytes")]
    Data {
        /// The rejected input
        data: String,
    },

    /// Adding the value would overflow the aggregate
    #[error("total value {total} plus {value} overflows uint256")]
    ValueOverflow {
        /// Aggregate before the rejected call
        total: U256,
        /// Value of the rejected call
        value: U256,
    },
}

/// Ordered batch of calls plus the native value they need in total
///
/// Calls are executed sequentially by the smart wallet, so insertion order is kept as is and
/// calls to the same target are never merged. A rejected call leaves the planner untouched.
///
/// In JSON a planner is the array of its calls; the total is recomputed when it is read back.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Call>", into = "Vec<Call>")]
pub struct CallPlanner {
    calls: Vec<Call>,
    total_value: U256,
}

impl CallPlanner {
    /// Creates an empty planner
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the input, appends the call and returns the new total value
    ///
    /// # Arguments
    /// * `target` - The 20-byte target address as a hex string
    /// * `value` - Signed amount of wei, must not be negative
    /// * `data` - Hex encoded calldata (`0x` for none)
    ///
    /// # Returns
    /// * `U256` - The aggregate value of all calls including this one
    pub fn add(&mut self, target: &str, value: I256, data: &str) -> Result<U256, InvalidCallError> {
        let call = Call::parse(target, value, data)?;
        self.push(call)
    }

    /// Appends an already typed call and returns the new total value
    pub fn push(&mut self, call: Call) -> Result<U256, InvalidCallError> {
        let total = self
            .total_value
            .checked_add(call.value)
            .ok_or(InvalidCallError::ValueOverflow { total: self.total_value, value: call.value })?;

        self.calls.push(call);
        self.total_value = total;

        Ok(total)
    }

    /// Calls in insertion order
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Sum of the values of all calls
    pub fn total_value(&self) -> U256 {
        self.total_value
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Consumes the planner, returning the calls and the total value
    pub fn into_parts(self) -> (Vec<Call>, U256) {
        (self.calls, self.total_value)
    }
}

impl TryFrom<Vec<Call>> for CallPlanner {
    type Error = InvalidCallError;

    fn try_from(calls: Vec<Call>) -> Result<Self, Self::Error> {
        let mut planner = Self::new();
        for call in calls {
            planner.push(call)?;
        }
        Ok(planner)
    }
}

impl From<CallPlanner> for Vec<Call> {
    fn from(planner: CallPlanner) -> Self {
        planner.calls
    }
}
