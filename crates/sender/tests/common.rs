use alloy::{
    eips::BlockNumberOrTag,
    primitives::{keccak256, Address, Bytes, TxHash},
    rpc::types::TransactionRequest,
};
use delegator_sender::EthClient;
use std::{collections::HashMap, sync::Mutex};

// anvil account #0
pub const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// In-memory execution client recording the transactions it is asked to send
#[derive(Debug, Default)]
pub struct MockEthClient {
    pub chain_id: u64,
    /// Transaction count at the latest block
    pub nonce: u64,
    /// Transaction count including the mempool
    pub pending_nonce: u64,
    pub code: HashMap<Address, Bytes>,
    pub sent: Mutex<Vec<TransactionRequest>>,
}

impl MockEthClient {
    pub fn new(chain_id: u64, nonce: u64) -> Self {
        Self { chain_id, nonce, pending_nonce: nonce, ..Default::default() }
    }

    pub fn with_pending_nonce(mut self, pending_nonce: u64) -> Self {
        self.pending_nonce = pending_nonce;
        self
    }

    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl EthClient for MockEthClient {
    async fn chain_id(&self) -> eyre::Result<u64> {
        Ok(self.chain_id)
    }

    async fn transaction_count(
        &self,
        _address: Address,
        block: BlockNumberOrTag,
    ) -> eyre::Result<u64> {
        match block {
            BlockNumberOrTag::Pending => Ok(self.pending_nonce),
            _ => Ok(self.nonce),
        }
    }

    async fn code_at(&self, address: Address) -> eyre::Result<Bytes> {
        Ok(self.code.get(&address).cloned().unwrap_or_default())
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> eyre::Result<TxHash> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(tx);
        Ok(keccak256(sent.len().to_be_bytes()))
    }
}
