//! Misc utils

use alloy::primitives::{Address, U256};

/// Serializes U256 as a decimal string
pub fn as_decimal_string<S>(val: &U256, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_str(&val.to_string())
}

/// Serializes an address with its EIP-55 checksum
pub fn as_checksum_address<S>(val: &Address, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_str(&val.to_checksum(None))
}

/// If possible, parses address from the first 20 bytes
pub fn get_address(buf: &[u8]) -> Option<Address> {
    if buf.len() >= 20 {
        Some(Address::from_slice(&buf[0..20]))
    } else {
        None
    }
}

/// Cuts the string down to `len` characters, appending `...` if anything was removed
pub fn preview(val: &str, len: usize) -> String {
    match val.char_indices().nth(len) {
        Some((idx, _)) => format!("{}...", &val[..idx]),
        None => val.to_string(),
    }
}
