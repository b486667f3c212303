//! ABI parameter decoding shared by the call and log paths.
//!
//! Parameters are decoded as a sequence (the head/tail layout of function
//! arguments and log data, with no outer offset word) using alloy's dynamic
//! ABI decoder, then rendered as strings:
//! - `bytes` / `bytesN` → `0x`-prefixed lowercase hex, byte-exact
//! - `uintN`            → decimal

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use kilncodec_core::{error::DecodeError, hexutil::to_hex, interface::ParamType};

/// Map a canonical parameter type to alloy's dynamic type.
pub fn to_dyn_type(ty: ParamType) -> DynSolType {
    match ty {
        ParamType::Bytes => DynSolType::Bytes,
        ParamType::FixedBytes(n) => DynSolType::FixedBytes(n),
        ParamType::Uint(bits) => DynSolType::Uint(bits),
    }
}

/// Decode `data` as the ABI-encoded tuple of `types` and render each value.
///
/// An empty type list decodes to an empty list whatever `data` holds.
/// Trailing bytes after the last parameter are ignored.
pub fn decode_params(
    item: &str,
    data: &[u8],
    types: &[DynSolType],
) -> Result<Vec<String>, DecodeError> {
    if types.is_empty() {
        return Ok(vec![]);
    }

    let tuple_type = DynSolType::Tuple(types.to_vec());
    let decoded = tuple_type
        .abi_decode_sequence(data)
        .map_err(|e| DecodeError::AbiDecodeFailed {
            item: item.to_string(),
            reason: e.to_string(),
        })?;

    let values = match decoded {
        DynSolValue::Tuple(vals) => vals,
        other => vec![other],
    };

    if values.len() != types.len() {
        return Err(DecodeError::AbiDecodeFailed {
            item: item.to_string(),
            reason: format!("expected {} values, got {}", types.len(), values.len()),
        });
    }

    values.iter().map(|v| render(item, v)).collect()
}

/// Decode one 32-byte indexed topic.
///
/// Dynamic types are stored as the keccak256 of their encoding and cannot be
/// recovered, so the topic itself is returned as hex.
pub fn decode_topic(item: &str, topic: &[u8], ty: ParamType) -> Result<String, DecodeError> {
    if topic.len() != 32 {
        return Err(DecodeError::AbiDecodeFailed {
            item: item.to_string(),
            reason: format!("topic is {} bytes, expected 32", topic.len()),
        });
    }
    if ty.is_dynamic() {
        return Ok(to_hex(topic));
    }
    let val = to_dyn_type(ty)
        .abi_decode(topic)
        .map_err(|e| DecodeError::AbiDecodeFailed {
            item: item.to_string(),
            reason: format!("topic decode: {e}"),
        })?;
    render(item, &val)
}

fn render(item: &str, val: &DynSolValue) -> Result<String, DecodeError> {
    match val {
        DynSolValue::Bytes(b) => Ok(to_hex(b)),
        DynSolValue::FixedBytes(word, size) => Ok(to_hex(&word[..*size])),
        DynSolValue::Uint(u, _) => Ok(u.to_string()),
        other => Err(DecodeError::AbiDecodeFailed {
            item: item.to_string(),
            reason: format!("unexpected value {other:?}"),
        }),
    }
}
