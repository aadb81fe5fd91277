mod common;

use alloy::primitives::{address, Address, Bytes, I256, U256};
use alloy_chains::{Chain, NamedChain};
use common::{MockEthClient, KEY};
use delegator_contracts::{ExecuteOptions, SmartWallet};
use delegator_primitives::{
    AuthorizationExecutor, CallPlanner, Delegation, DelegationStatus, Wallet,
};
use delegator_sender::Delegator;
use std::sync::Arc;

const SEPOLIA: u64 = 11155111;
const SMART_WALLET: Address = address!("000000009b1d0af20d8c6d0a44e162d11f9b8f00");

fn setup(nonce: u64) -> eyre::Result<(Delegator<MockEthClient>, Arc<MockEthClient>)> {
    let client = Arc::new(MockEthClient::new(SEPOLIA, nonce));
    let delegator = Delegator::new(Wallet::from_key(KEY)?, client.clone());
    Ok((delegator, client))
}

#[tokio::test]
async fn authorize_uses_next_nonce_when_self_sponsored() -> eyre::Result<()> {
    let (delegator, _) = setup(3)?;

    let auth = delegator.authorize(SMART_WALLET, AuthorizationExecutor::SelfSponsored).await?;
    assert_eq!(auth.nonce, 4);
    assert_eq!(auth.chain_id, U256::from(SEPOLIA));
    assert_eq!(auth.address, SMART_WALLET);
    assert_eq!(auth.recover_authority()?, delegator.address());

    let auth = delegator.authorize(SMART_WALLET, AuthorizationExecutor::Relayer).await?;
    assert_eq!(auth.nonce, 3);
    Ok(())
}

#[tokio::test]
async fn authorize_counts_transactions_in_mempool() -> eyre::Result<()> {
    let client = Arc::new(MockEthClient::new(SEPOLIA, 3).with_pending_nonce(5));
    let delegator = Delegator::new(Wallet::from_key(KEY)?, client);

    let auth = delegator.authorize(SMART_WALLET, AuthorizationExecutor::SelfSponsored).await?;
    assert_eq!(auth.nonce, 6);

    let auth = delegator.authorize(SMART_WALLET, AuthorizationExecutor::Relayer).await?;
    assert_eq!(auth.nonce, 5);
    Ok(())
}

#[tokio::test]
async fn authorize_fails_when_nonce_overflows() -> eyre::Result<()> {
    let (delegator, client) = setup(u64::MAX)?;

    let err = delegator
        .authorize(SMART_WALLET, AuthorizationExecutor::SelfSponsored)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("overflows"));

    let auth = delegator.authorize(SMART_WALLET, AuthorizationExecutor::Relayer).await?;
    assert_eq!(auth.nonce, u64::MAX);

    delegator.delegate(SMART_WALLET).await.unwrap_err();
    assert!(client.sent().is_empty());
    Ok(())
}

#[tokio::test]
async fn delegate_sends_type_4_transaction_to_self() -> eyre::Result<()> {
    let (delegator, client) = setup(0)?;

    delegator.delegate(SMART_WALLET).await?;

    let sent = client.sent();
    assert_eq!(sent.len(), 1);
    let tx = &sent[0];
    assert_eq!(tx.from, Some(delegator.address()));
    assert_eq!(tx.to.and_then(|kind| kind.to().copied()), Some(delegator.address()));
    assert_eq!(tx.input.input().cloned().unwrap_or_default(), Bytes::new());
    assert_eq!(tx.value, Some(U256::ZERO));

    let auths = tx.authorization_list.clone().unwrap_or_default();
    assert_eq!(auths.len(), 1);
    assert_eq!(auths[0].address, SMART_WALLET);
    assert_eq!(auths[0].nonce, 1);
    Ok(())
}

#[tokio::test]
async fn delegate_and_execute_carries_batch() -> eyre::Result<()> {
    let (delegator, client) = setup(5)?;

    let mut planner = CallPlanner::new();
    planner.add(&delegator.address().to_string(), I256::ZERO, "0x")?;
    let value = I256::try_from(50).unwrap();
    planner.add("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa0002", value, "0xbeef")?;
    let params = SmartWallet::encode_plan(&planner, ExecuteOptions::default());
    let execution = SmartWallet::create_execute(params, Chain::from_named(NamedChain::Sepolia))?;

    delegator.delegate_and_execute(&execution).await?;

    let tx = &client.sent()[0];
    assert_eq!(tx.to.and_then(|kind| kind.to().copied()), Some(delegator.address()));
    assert_eq!(tx.input.input().cloned(), Some(execution.data.clone()));
    assert_eq!(tx.value, Some(U256::from(50)));

    let auths = tx.authorization_list.clone().unwrap_or_default();
    assert_eq!(auths[0].address, SMART_WALLET);
    assert_eq!(auths[0].nonce, 6);

    let (_, calls) = SmartWallet::decode_batched_call(&execution.data)?;
    assert_eq!(calls, planner.calls());
    Ok(())
}

#[tokio::test]
async fn revoke_delegates_to_zero_address() -> eyre::Result<()> {
    let (delegator, client) = setup(9)?;

    delegator.revoke().await?;

    let tx = &client.sent()[0];
    let auths = tx.authorization_list.clone().unwrap_or_default();
    assert_eq!(auths[0].address, Address::ZERO);
    assert_eq!(auths[0].nonce, 10);
    assert_eq!(auths[0].recover_authority()?, delegator.address());
    Ok(())
}

#[tokio::test]
async fn delegation_status() -> eyre::Result<()> {
    let delegated = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
    let contract = address!("3a9d48ab9751398bbfa63ad67599bb04e4bdf98b");

    let mut client = MockEthClient::new(SEPOLIA, 0);
    client.code.insert(delegated, Delegation::designator(SMART_WALLET));
    client.code.insert(contract, Bytes::from_static(&[0x60, 0x80, 0x60, 0x40]));
    let delegator = Delegator::new(Wallet::from_key(KEY)?, Arc::new(client));

    assert_eq!(
        delegator.delegation_status(delegated).await?,
        DelegationStatus::Delegated(SMART_WALLET)
    );
    assert_eq!(delegator.delegation_status(contract).await?, DelegationStatus::Contract);
    assert_eq!(
        delegator.delegation_status(Address::repeat_byte(0x11)).await?,
        DelegationStatus::NotDelegated
    );
    Ok(())
}
