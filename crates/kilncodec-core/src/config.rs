//! Decoder configuration.

use serde::{Deserialize, Serialize};

/// How strictly the `_publicKeys` payload of exit/withdraw calls is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicKeyPolicy {
    /// Accept a payload of any length.
    #[default]
    AnyLength,
    /// Require a non-empty whole number of 48-byte BLS public keys.
    WholeKeys,
}

/// Per-decoder settings. Missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Report malformed payloads behind a matching selector to the logger
    #[serde(default = "bool_true")]
    pub report_malformed: bool,
    /// Length check applied to `_publicKeys`
    #[serde(default)]
    pub public_keys: PublicKeyPolicy,
}

fn bool_true() -> bool {
    true
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            report_malformed: true,
            public_keys: PublicKeyPolicy::AnyLength,
        }
    }
}

impl DecoderConfig {
    /// Parse a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
