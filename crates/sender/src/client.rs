use alloy::{
    eips::BlockNumberOrTag,
    network::ReceiptResponse,
    primitives::{Address, Bytes, TxHash},
    providers::Provider,
    rpc::types::TransactionRequest,
};
use delegator_contracts::decode_revert_string;
use tracing::trace;

/// Access to the Ethereum execution client needed to delegate an account
#[async_trait::async_trait]
pub trait EthClient: Send + Sync + 'static {
    /// Chain id reported by the execution client
    async fn chain_id(&self) -> eyre::Result<u64>;

    /// Number of transactions sent from the address as of `block`
    ///
    /// At [Pending](BlockNumberOrTag::Pending) this includes transactions still in the mempool,
    /// which is the nonce the provider fills into the next transaction.
    async fn transaction_count(
        &self,
        address: Address,
        block: BlockNumberOrTag,
    ) -> eyre::Result<u64>;

    /// Code of the account at the latest block
    async fn code_at(&self, address: Address) -> eyre::Result<Bytes>;

    /// Signs and sends the transaction
    ///
    /// # Arguments
    /// * `tx` - The [TransactionRequest](TransactionRequest) to send
    ///
    /// # Returns
    /// * `TxHash` - The transaction hash
    async fn send_transaction(&self, tx: TransactionRequest) -> eyre::Result<TxHash>;
}

/// [EthClient](EthClient) backed by an alloy provider that holds the signing wallet
#[derive(Clone, Debug)]
pub struct EthereumClient<P> {
    provider: P,
    wait_for_receipt: bool,
}

impl<P> EthereumClient<P>
where
    P: Provider + Clone + 'static,
{
    /// Create an Ethereum client
    ///
    /// # Arguments
    /// * `provider` - Connection to the Ethereum execution client, filling and signing transactions
    /// * `wait_for_receipt` - Whether [send_transaction](EthClient::send_transaction) waits for
    ///   the transaction to be included
    pub fn new(provider: P, wait_for_receipt: bool) -> Self {
        Self { provider, wait_for_receipt }
    }
}

#[async_trait::async_trait]
impl<P> EthClient for EthereumClient<P>
where
    P: Provider + Clone + 'static,
{
    async fn chain_id(&self) -> eyre::Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn transaction_count(
        &self,
        address: Address,
        block: BlockNumberOrTag,
    ) -> eyre::Result<u64> {
        Ok(self.provider.get_transaction_count(address).block_id(block.into()).await?)
    }

    async fn code_at(&self, address: Address) -> eyre::Result<Bytes> {
        Ok(self.provider.get_code_at(address).await?)
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> eyre::Result<TxHash> {
        trace!("Sending transaction to the execution client: {tx:?}");

        let pending = match self.provider.send_transaction(tx).await {
            Ok(pending) => pending,
            Err(err) => {
                let reason = err
                    .as_error_resp()
                    .and_then(|payload| payload.as_revert_data())
                    .and_then(|data| decode_revert_string(&data));
                return match reason {
                    Some(reason) => Err(eyre::eyre!("Transaction rejected: {reason}")),
                    None => Err(err.into()),
                };
            }
        };
        let tx_hash = *pending.tx_hash();

        if self.wait_for_receipt {
            let receipt = pending.get_receipt().await?;
            trace!("Transaction receipt: {receipt:?}");

            if !receipt.status() {
                return Err(eyre::eyre!("Transaction {tx_hash:?} reverted"));
            }
        }

        Ok(tx_hash)
    }
}
