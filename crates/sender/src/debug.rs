//! Human readable summaries of delegation transactions, logged before they are sent

use alloy::{
    eips::eip7702::SignedAuthorization,
    primitives::{Address, Bytes, U256},
    rpc::types::TransactionRequest,
};
use delegator_contracts::{function_signature, ExecutionCall, MethodParameters};
use delegator_primitives::{as_decimal_string, constants::debug::PREVIEW_LENGTH, preview};
use serde::Serialize;
use tracing::{debug, info};

/// Fields of a signed authorization tuple
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationSummary {
    pub address: Address,
    pub chain_id: U256,
    pub nonce: u64,
    pub r: U256,
    pub s: U256,
    pub y_parity: u8,
}

impl From<&SignedAuthorization> for AuthorizationSummary {
    fn from(auth: &SignedAuthorization) -> Self {
        Self {
            address: auth.address,
            chain_id: auth.chain_id,
            nonce: auth.nonce,
            r: auth.r(),
            s: auth.s(),
            y_parity: auth.y_parity(),
        }
    }
}

/// Summary of a transaction request
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    /// EIP-2718 transaction type
    #[serde(rename = "type")]
    pub tx_type: u8,
    pub to: Option<Address>,
    pub data: Bytes,
    #[serde(serialize_with = "as_decimal_string")]
    pub value: U256,
    /// Signature of the called function, when known
    pub function: Option<&'static str>,
    pub authorization_list: Vec<AuthorizationSummary>,
}

impl TransactionSummary {
    pub fn from_request(tx: &TransactionRequest) -> Self {
        let data = tx.input.input().cloned().unwrap_or_default();
        Self {
            tx_type: tx.preferred_type() as u8,
            to: tx.to.and_then(|kind| kind.to().copied()),
            function: function_signature(&data),
            data,
            value: tx.value.unwrap_or_default(),
            authorization_list: tx
                .authorization_list
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(Into::into)
                .collect(),
        }
    }

    /// Length of the hex encoded data, `0x` included
    pub fn data_length(&self) -> usize {
        self.data.to_string().len()
    }

    pub fn data_preview(&self) -> String {
        preview(&self.data.to_string(), PREVIEW_LENGTH)
    }

    /// Logs the components of the transaction
    pub fn log(&self) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => debug!("Transaction request: {json}"),
            Err(err) => debug!("Transaction request could not be serialized: {err:?}"),
        }

        info!(
            "Transaction type: {}, to: {:?}, value: {} wei, function: {}",
            self.tx_type,
            self.to,
            self.value,
            self.function.unwrap_or("unknown")
        );
        info!("Data length: {} characters, data: {}", self.data_length(), self.data_preview());
        info!("Authorization count: {}", self.authorization_list.len());
        for auth in &self.authorization_list {
            info!(
                "Authorization for {:?}, chain id: {}, nonce: {}, y parity: {}, r: {}, s: {}",
                auth.address, auth.chain_id, auth.nonce, auth.y_parity, auth.r, auth.s
            );
        }
    }
}

/// Logs the smart wallet call an EOA executes after delegating
pub fn log_execution_call(execution: &ExecutionCall) {
    let data = execution.data.to_string();
    info!(
        "Execution call to {:?}, value: {} wei, data length: {} characters, data: {}",
        execution.to,
        execution.value,
        data.len(),
        preview(&data, PREVIEW_LENGTH)
    );
}

/// Logs the encoded batch of calls
pub fn log_method_parameters(params: &MethodParameters) {
    let calldata = params.calldata.to_string();
    info!(
        "Method parameters value: {} wei, calldata length: {} characters, calldata: {}",
        params.value,
        calldata.len(),
        preview(&calldata, PREVIEW_LENGTH)
    );
}
