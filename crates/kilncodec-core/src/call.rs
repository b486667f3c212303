//! Types for decoded function calls.
//!
//! The serialized shape is `{ method, parameters: [{ name, type, value, valueDecoded }] }`,
//! the same record the staking API hands to its clients.

use serde::{Deserialize, Serialize};

/// One decoded function input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedParameter {
    /// Parameter name from the interface (`"arg{i}"` when unnamed)
    pub name: String,
    /// Canonical Solidity type, e.g. `"bytes"`
    #[serde(rename = "type")]
    pub ty: String,
    /// `0x`-prefixed hex for byte types, decimal for integers
    pub value: String,
    /// Nested decoding of `value`; always `null` for flat parameters
    pub value_decoded: Option<serde_json::Value>,
}

/// Result of decoding a function call's calldata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedCall {
    /// Function name, e.g. `"requestValidatorsExit"`
    pub method: String,
    /// Decoded inputs in declaration order
    pub parameters: Vec<DecodedParameter>,
}

impl DecodedCall {
    /// Look up a decoded parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&DecodedParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}
