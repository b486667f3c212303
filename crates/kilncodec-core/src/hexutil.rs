//! `0x`-prefixed hex helpers shared by inputs and outputs.

use crate::error::DecodeError;

/// Lowercase hex with a `0x` prefix.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse hex with or without a `0x` prefix.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, DecodeError> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(stripped).map_err(|e| DecodeError::InvalidHex {
        reason: format!("'{}': {e}", truncate(s)),
    })
}

fn truncate(s: &str) -> &str {
    match s.char_indices().nth(18) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
