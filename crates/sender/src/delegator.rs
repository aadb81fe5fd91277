use crate::{client::EthClient, debug::TransactionSummary};
use alloy::{
    eips::{eip7702::SignedAuthorization, BlockNumberOrTag},
    network::{TransactionBuilder, TransactionBuilder7702},
    primitives::{Address, Bytes, TxHash, U256},
    rpc::types::TransactionRequest,
};
use delegator_contracts::ExecutionCall;
use delegator_primitives::{AuthorizationExecutor, Delegation, DelegationStatus, Wallet};
use std::sync::Arc;
use tracing::{info, trace};

/// The `Delegator` signs EIP-7702 authorizations for its wallet and sends the Type-4
/// transactions that install (or remove) a delegation on the wallet's EOA
#[derive(Clone, Debug)]
pub struct Delegator<C>
where
    C: EthClient,
{
    /// Wallet of the EOA being delegated
    pub wallet: Wallet,
    /// Ethereum execution client
    pub client: Arc<C>,
}

impl<C> Delegator<C>
where
    C: EthClient,
{
    pub fn new(wallet: Wallet, client: Arc<C>) -> Self {
        Self { wallet, client }
    }

    /// Address of the delegated EOA
    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    /// Signs an authorization delegating the EOA to `contract`
    ///
    /// # Arguments
    /// * `contract` - The contract the EOA delegates to (zero address removes the delegation)
    /// * `executor` - Who sends the transaction carrying the authorization
    ///
    /// # Returns
    /// * `SignedAuthorization` - Authorization for the current chain and the pending nonce
    pub async fn authorize(
        &self,
        contract: Address,
        executor: AuthorizationExecutor,
    ) -> eyre::Result<SignedAuthorization> {
        let chain_id = self.client.chain_id().await?;
        let address = self.address();
        let nonce = self.client.transaction_count(address, BlockNumberOrTag::Pending).await?;
        let nonce = executor
            .authorization_nonce(nonce)
            .ok_or_else(|| eyre::eyre!("Nonce of {address:?} overflows"))?;

        let auth = self.wallet.sign_authorization(contract, chain_id, nonce)?;
        trace!("Authorization: {auth:?}");

        Ok(auth)
    }

    /// Type-4 transaction from the EOA to itself carrying the authorization
    pub fn transaction_request(
        &self,
        auth: SignedAuthorization,
        data: Bytes,
        value: U256,
    ) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(self.address())
            .with_to(self.address())
            .with_input(data)
            .with_value(value)
            .with_authorization_list(vec![auth])
    }

    /// Delegates the EOA to `contract` without executing anything
    pub async fn delegate(&self, contract: Address) -> eyre::Result<TxHash> {
        let auth = self.authorize(contract, AuthorizationExecutor::SelfSponsored).await?;
        let hash = self.send(self.transaction_request(auth, Bytes::new(), U256::ZERO)).await?;

        info!("Account {:?} delegated to {contract:?}, hash: {hash:?}", self.address());
        Ok(hash)
    }

    /// Delegates the EOA to the smart wallet of the execution and executes its batch in the
    /// same transaction
    ///
    /// # Arguments
    /// * `execution` - The [ExecutionCall](ExecutionCall) created for the smart wallet
    ///
    /// # Returns
    /// * `TxHash` - The transaction hash
    pub async fn delegate_and_execute(&self, execution: &ExecutionCall) -> eyre::Result<TxHash> {
        let auth = self.authorize(execution.to, AuthorizationExecutor::SelfSponsored).await?;
        let tx = self.transaction_request(auth, execution.data.clone(), execution.value);
        let hash = self.send(tx).await?;

        info!(
            "Account {:?} delegated to {:?} and executed batch, hash: {hash:?}",
            self.address(),
            execution.to
        );
        Ok(hash)
    }

    /// Removes the delegation by delegating to the zero address
    pub async fn revoke(&self) -> eyre::Result<TxHash> {
        let auth = self.authorize(Address::ZERO, AuthorizationExecutor::SelfSponsored).await?;
        let hash = self.send(self.transaction_request(auth, Bytes::new(), U256::ZERO)).await?;

        info!("Delegation of account {:?} removed, hash: {hash:?}", self.address());
        Ok(hash)
    }

    /// Reads the code of `address` and parses its delegation
    pub async fn delegation_status(&self, address: Address) -> eyre::Result<DelegationStatus> {
        let code = self.client.code_at(address).await?;
        trace!("Code of {address:?}: {code}");
        Ok(Delegation::parse_from_code(&code))
    }

    async fn send(&self, tx: TransactionRequest) -> eyre::Result<TxHash> {
        TransactionSummary::from_request(&tx).log();
        self.client.send_transaction(tx).await
    }
}
