use crate::utils::run_until_ctrl_c;
use clap::{value_parser, Parser, Subcommand};
use std::panic;

pub mod args;
pub mod commands;

/// The main Delegator CLI interface
#[derive(Debug, Parser)]
#[command(author, version, about = "Delegator", long_about = None)]
pub struct Cli {
    /// The command to execute
    #[clap(subcommand)]
    command: Commands,

    /// The verbosity level
    #[clap(long, short, global = true, default_value_t = 2, value_parser = value_parser!(u8).range(..=4))]
    verbosity: u8,
}

impl Cli {
    /// Get the log level based on the verbosity level
    pub fn get_log_level(&self) -> String {
        match self.verbosity {
            0 => "error",
            1 => "warn",
            2 => "info",
            3 => "debug",
            _ => "trace",
        }
        .into()
    }
}

/// Commands to be executed
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Delegate the EOA to a smart wallet (EIP-7702 Type-4 transaction)
    #[command(name = "delegate")]
    Delegate(commands::DelegateCommand),

    /// Delegate the EOA and execute a batched call through the smart wallet
    #[command(name = "execute")]
    Execute(commands::ExecuteCommand),

    /// Delegate the EOA and swap native currency through the Universal Router
    #[command(name = "swap")]
    Swap(Box<commands::SwapCommand>),

    /// Check the delegation of an account
    #[command(name = "check")]
    Check(commands::CheckCommand),

    /// Remove the delegation of the EOA
    #[command(name = "revoke")]
    Revoke(commands::RevokeCommand),
}

pub fn run() -> eyre::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let level = cli.get_log_level();
    let directives =
        format!("delegator={level},delegator_sender={level},delegator_primitives={level}");
    let rust_log = match std::env::var("RUST_LOG") {
        Ok(val) => format!("{val},{directives}"),
        Err(_) => directives,
    };
    std::env::set_var("RUST_LOG", rust_log);
    tracing_subscriber::fmt::init();

    std::thread::Builder::new()
        .spawn(move || {
            let rt = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;

            let task = async move {
                match cli.command {
                    Commands::Delegate(command) => command.execute().await,
                    Commands::Execute(command) => command.execute().await,
                    Commands::Swap(command) => command.execute().await,
                    Commands::Check(command) => command.execute().await,
                    Commands::Revoke(command) => command.execute().await,
                }
            };

            rt.block_on(run_until_ctrl_c(task))?;
            Ok(())
        })?
        .join()
        .unwrap_or_else(|e| panic::resume_unwind(e))
}
