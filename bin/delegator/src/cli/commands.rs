use super::args::{EthClientArgs, ExecuteArgs, SwapArgs, WalletArgs};
use crate::utils::{address_from_env, parse_address};
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy_chains::Chain;
use clap::Parser;
use delegator_contracts::{ExecutionCall, SmartWallet};
use delegator_primitives::{
    chain::ChainExt,
    provider::{create_http_provider, create_http_signer_provider},
    Call, CallPlanner, Delegation,
};
use delegator_sender::{
    log_execution_call, log_method_parameters, Delegator, EthClient, EthereumClient,
};
use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tracing::{debug, info};

/// Delegate the EOA to a smart wallet
#[derive(Debug, Parser)]
pub struct DelegateCommand {
    #[clap(flatten)]
    eth: EthClientArgs,

    #[clap(flatten)]
    wallet: WalletArgs,

    /// Contract to delegate to.
    ///
    /// By default, the smart wallet deployment of the chain.
    #[clap(long, value_parser = parse_address)]
    contract: Option<Address>,
}

impl DelegateCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        let (delegator, chain) = create_delegator(&self.eth, &self.wallet).await?;
        let contract = match self.contract {
            Some(contract) => contract,
            None => smart_wallet_address(chain)?,
        };

        let hash = delegator.delegate(contract).await?;
        log_sent(chain, &hash);

        if !self.eth.no_wait {
            let status = delegator.delegation_status(delegator.address()).await?;
            info!("Delegation status of {:?}: {status}", delegator.address());
        }

        Ok(())
    }
}

/// Delegate the EOA to the smart wallet and execute a call to itself through it
#[derive(Debug, Parser)]
pub struct ExecuteCommand {
    #[clap(flatten)]
    eth: EthClientArgs,

    #[clap(flatten)]
    wallet: WalletArgs,

    #[clap(flatten)]
    execute: ExecuteArgs,
}

impl ExecuteCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        let (delegator, chain) = create_delegator(&self.eth, &self.wallet).await?;

        let planner = self_call_plan(delegator.address())?;
        info!("Planned {} call(s), total value: {} wei", planner.len(), planner.total_value());

        let execution = create_execution(&planner, &self.execute, chain)?;
        let hash = delegator.delegate_and_execute(&execution).await?;
        log_sent(chain, &hash);

        Ok(())
    }
}

/// Delegate the EOA to the smart wallet and swap native currency through the Universal Router
#[derive(Debug, Parser)]
pub struct SwapCommand {
    #[clap(flatten)]
    eth: EthClientArgs,

    #[clap(flatten)]
    wallet: WalletArgs,

    #[clap(flatten)]
    execute: ExecuteArgs,

    #[clap(flatten)]
    swap: SwapArgs,
}

impl SwapCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        let (delegator, chain) = create_delegator(&self.eth, &self.wallet).await?;

        let route = self.swap.native_swap(delegator.address()).route()?;
        let deadline = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() + self.swap.deadline;
        let calldata = route.encode_execute(U256::from(deadline));
        debug!("Universal Router calldata: {calldata}");

        info!(
            "Swapping {} wei of {:?} for {:?} through router {:?}",
            self.swap.amount_in, self.swap.weth, self.swap.token_out, self.swap.router
        );

        let mut planner = CallPlanner::new();
        planner.push(Call::new(self.swap.router, self.swap.amount_in, calldata))?;
        info!("Planned {} call(s), total value: {} wei", planner.len(), planner.total_value());

        let execution = create_execution(&planner, &self.execute, chain)?;
        let hash = delegator.delegate_and_execute(&execution).await?;
        log_sent(chain, &hash);

        Ok(())
    }
}

/// Print the code of an account and its delegation
#[derive(Debug, Parser)]
pub struct CheckCommand {
    #[clap(flatten)]
    eth: EthClientArgs,

    /// Account to check.
    ///
    /// By default, the address in `ADDRESS` or `PUBLIC_KEY`.
    #[clap(long, env = "CHECK_ADDRESS", value_parser = parse_address)]
    address: Option<Address>,
}

impl CheckCommand {
    /// Account given on the command line, else the first of `ADDRESS` and `PUBLIC_KEY` that is set
    fn account(&self) -> eyre::Result<Address> {
        if let Some(address) = self.address {
            return Ok(address);
        }

        address_from_env(&["ADDRESS", "PUBLIC_KEY"])
            .map_err(|err| eyre::eyre!(err))?
            .ok_or_else(|| eyre::eyre!("No account to check, set --address, ADDRESS or PUBLIC_KEY"))
    }

    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        let address = self.account()?;
        let client = EthereumClient::new(create_http_provider(&self.eth.rpc_url)?, false);
        let chain = connected_chain(&client, &self.eth).await?;

        let code = client.code_at(address).await?;
        info!("Code of {address:?} on {chain}: {code}");

        let status = Delegation::parse_from_code(&code);
        info!("Delegation status: {status}");
        debug!("{}", serde_json::to_string(&status)?);

        Ok(())
    }
}

/// Remove the delegation of the EOA
#[derive(Debug, Parser)]
pub struct RevokeCommand {
    #[clap(flatten)]
    eth: EthClientArgs,

    #[clap(flatten)]
    wallet: WalletArgs,
}

impl RevokeCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        let (delegator, chain) = create_delegator(&self.eth, &self.wallet).await?;

        let hash = delegator.revoke().await?;
        log_sent(chain, &hash);

        Ok(())
    }
}

async fn create_delegator(
    eth: &EthClientArgs,
    wallet: &WalletArgs,
) -> eyre::Result<(Delegator<impl EthClient>, Chain)> {
    let wallet = wallet.wallet()?;
    let provider = create_http_signer_provider(&eth.rpc_url, &wallet, eth.poll_interval)?;
    let client = EthereumClient::new(provider, !eth.no_wait);

    let chain = connected_chain(&client, eth).await?;
    info!("Using account {:?} on {chain}", wallet.address());

    Ok((Delegator::new(wallet, Arc::new(client)), chain))
}

/// Reads the chain of the endpoint, failing if it is not the one expected
async fn connected_chain<C: EthClient>(client: &C, eth: &EthClientArgs) -> eyre::Result<Chain> {
    let chain = Chain::from_id(client.chain_id().await?);

    if let Some(expected) = eth.chain {
        if expected.id() != chain.id() {
            return Err(eyre::eyre!("Endpoint serves chain {chain}, expected {expected}"));
        }
    }

    Ok(chain)
}

/// Batch with a single zero-value call from the account to itself
fn self_call_plan(account: Address) -> eyre::Result<CallPlanner> {
    let mut planner = CallPlanner::new();
    planner.push(Call::new(account, U256::ZERO, Bytes::new()))?;
    Ok(planner)
}

fn smart_wallet_address(chain: Chain) -> eyre::Result<Address> {
    chain
        .smart_wallet_address()
        .ok_or_else(|| eyre::eyre!("No smart wallet deployment known on chain {chain}"))
}

fn create_execution(
    planner: &CallPlanner,
    args: &ExecuteArgs,
    chain: Chain,
) -> eyre::Result<ExecutionCall> {
    let params = SmartWallet::encode_plan(planner, args.options());
    log_method_parameters(&params);

    let execution = SmartWallet::create_execute(params, chain)?;
    log_execution_call(&execution);

    Ok(execution)
}

fn log_sent(chain: Chain, hash: &TxHash) {
    match chain.explorer_tx_url(hash) {
        Some(url) => info!("Transaction sent: {url}"),
        None => info!("Transaction sent: {hash:?}"),
    }
}
