use alloy::primitives::{Address, U256};
use alloy_chains::Chain;
use pin_utils::pin_mut;
use std::{future::Future, str::FromStr, time::Duration};
use tracing::info;

/// Parses address from string
pub fn parse_address(s: &str) -> Result<Address, String> {
    Address::from_str(s).map_err(|_| format!("String {s} is not a valid address"))
}

/// Parses the first of the environment variables `vars` that is set and not empty
pub fn address_from_env(vars: &[&str]) -> Result<Option<Address>, String> {
    vars.iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.trim().is_empty())
        .map(|value| parse_address(value.trim()))
        .transpose()
}

/// Parses U256 from string
pub fn parse_u256(s: &str) -> Result<U256, String> {
    U256::from_str_radix(s, 10).map_err(|_| format!("String {s} is not a valid U256"))
}

/// Parses chain from its name or id
pub fn parse_chain(s: &str) -> Result<Chain, String> {
    Chain::from_str(s).map_err(|_| format!("String {s} is not a valid chain"))
}

pub fn parse_duration(duration: &str) -> Result<Duration, String> {
    let millis: u64 = duration.parse().map_err(|_| format!("{duration} must be unsigned int"))?;
    Ok(Duration::from_millis(millis))
}

/// Runs the future to completion or until:
/// - `ctrl-c` is received.
/// - `SIGTERM` is received (unix only).
pub async fn run_until_ctrl_c<F, E>(fut: F) -> Result<(), E>
where
    F: Future<Output = Result<(), E>>,
    E: Send + Sync + 'static + From<std::io::Error>,
{
    let ctrl_c = tokio::signal::ctrl_c();

    let mut stream = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
    let sigterm = stream.recv();
    pin_mut!(sigterm, ctrl_c, fut);

    tokio::select! {
        _ = ctrl_c => {
            info!("Received ctrl-c signal.");
        },
        _ = sigterm => {
            info!("Received SIGTERM signal.");
        },
        res = fut => res?,
    }

    Ok(())
}

/// Checks that the string is a 32-byte hex private key, with or without `0x`
pub fn validate_private_key(hex_string: &str) -> Result<String, String> {
    let digits = hex_string.strip_prefix("0x").unwrap_or(hex_string);

    if digits.chars().count() != 64 {
        return Err("private key must be 32 bytes of hex".into());
    }

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err("private key is not a valid hexadecimal string".into());
    }

    Ok(String::from(hex_string))
}
