//! Error types for interface construction and per-call decoding.

use thiserror::Error;

/// Errors raised while building an interface definition or its selector index.
///
/// These are programming errors in a static ABI, never a reaction to call
/// input. A decoder must not be constructed from an interface that fails here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterfaceError {
    #[error("Function '{name}' is defined more than once")]
    DuplicateFunction { name: String },

    #[error("Event '{name}' is defined more than once")]
    DuplicateEvent { name: String },

    #[error("Parameter '{param}' appears more than once in '{item}'")]
    DuplicateParameter { item: String, param: String },

    #[error("Interface item has an empty name")]
    EmptyName,

    #[error("Unsupported parameter type '{ty}' in '{item}'")]
    UnsupportedType { item: String, ty: String },

    #[error("Selector collision on {selector}: '{first}' and '{second}'")]
    SelectorCollision {
        selector: String,
        first: String,
        second: String,
    },

    #[error("Required item '{name}' missing from interface")]
    MissingItem { name: String },

    #[error("Item '{name}' has an unexpected shape: {reason}")]
    UnexpectedShape { name: String, reason: String },

    #[error("Invalid ABI JSON: {reason}")]
    InvalidAbiJson { reason: String },
}

/// Errors produced while decoding a single call or log.
///
/// The decoder never hands these to its callers. No-match variants mean
/// "not this operation" and are dropped; every other variant is a malformed
/// payload behind a matching selector and is reported before being dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Call data too short: {len} bytes (need at least 4 for selector)")]
    DataTooShort { len: usize },

    #[error("No function found for selector {selector}")]
    UnknownSelector { selector: String },

    #[error("Selector {selector} belongs to '{found}', expected '{expected}'")]
    WrongOperation {
        expected: &'static str,
        found: String,
        selector: String,
    },

    #[error("Log has no topics")]
    MissingTopics,

    #[error("No event found for signature {signature}")]
    UnknownEventSignature { signature: String },

    #[error("Invalid hex: {reason}")]
    InvalidHex { reason: String },

    #[error("ABI decode failed for '{item}': {reason}")]
    AbiDecodeFailed { item: String, reason: String },

    #[error("Public keys payload of {len} bytes is not a whole number of {key_len}-byte keys")]
    InvalidPublicKeys { len: usize, key_len: usize },

    #[error("Missing required field: {field}")]
    MissingField { field: String },
}

impl DecodeError {
    /// Returns `true` when the input simply is not the requested operation.
    pub fn is_no_match(&self) -> bool {
        matches!(
            self,
            Self::DataTooShort { .. }
                | Self::UnknownSelector { .. }
                | Self::WrongOperation { .. }
                | Self::MissingTopics
                | Self::UnknownEventSignature { .. }
                | Self::InvalidHex { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_match_split() {
        assert!(DecodeError::DataTooShort { len: 1 }.is_no_match());
        assert!(DecodeError::MissingTopics.is_no_match());
        assert!(!DecodeError::AbiDecodeFailed {
            item: "requestValidatorsExit".into(),
            reason: "buffer overrun".into(),
        }
        .is_no_match());
        assert!(!DecodeError::InvalidPublicKeys { len: 47, key_len: 48 }.is_no_match());
    }

    #[test]
    fn display_messages() {
        let e = DecodeError::WrongOperation {
            expected: "deposit",
            found: "batchWithdrawCLFee".into(),
            selector: "0x0ffab6c2".into(),
        };
        assert_eq!(
            e.to_string(),
            "Selector 0x0ffab6c2 belongs to 'batchWithdrawCLFee', expected 'deposit'"
        );
        let e = InterfaceError::DuplicateFunction { name: "deposit".into() };
        assert_eq!(e.to_string(), "Function 'deposit' is defined more than once");
    }
}
