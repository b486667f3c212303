//! Raw and decoded event-log types.

use crate::error::DecodeError;
use crate::hexutil::parse_hex;
use serde::{Deserialize, Serialize};

/// A raw log entry as found in a transaction receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLog {
    /// ABI-encoded non-indexed parameters.
    pub data: Vec<u8>,
    /// topics[0] is the event signature hash; topics[1..] are indexed params.
    pub topics: Vec<Vec<u8>>,
}

impl RawLog {
    pub fn new(data: Vec<u8>, topics: Vec<Vec<u8>>) -> Self {
        Self { data, topics }
    }

    /// Build a log from `0x`-prefixed hex strings, as returned by JSON-RPC.
    pub fn from_hex<S: AsRef<str>>(data: &str, topics: &[S]) -> Result<Self, DecodeError> {
        let data = parse_hex(data)?;
        let topics = topics
            .iter()
            .map(|t| parse_hex(t.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { data, topics })
    }

    /// topics[0] as a 32-byte hash, if present and well-sized.
    pub fn signature(&self) -> Option<[u8; 32]> {
        self.topics.first()?.as_slice().try_into().ok()
    }
}

/// A generically decoded log: the event name and its fields in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedLog {
    pub event: String,
    pub fields: Vec<(String, String)>,
}

impl DecodedLog {
    /// Get a field value by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn take(&self, name: &str) -> Result<String, DecodeError> {
        self.field(name)
            .map(str::to_string)
            .ok_or_else(|| DecodeError::MissingField {
                field: name.to_string(),
            })
    }
}

/// The beacon-deposit `DepositEvent` emitted by a Kiln deposit.
///
/// Every field is the raw `bytes` value as `0x`-prefixed hex. `amount` and
/// `index` are little-endian integers on chain and are not converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositEvent {
    pub pubkey: String,
    pub withdrawal_credentials: String,
    pub amount: String,
    pub signature: String,
    pub index: String,
}

impl DepositEvent {
    /// Field names in declared order.
    pub const FIELDS: [&'static str; 5] =
        ["pubkey", "withdrawal_credentials", "amount", "signature", "index"];
}

impl TryFrom<&DecodedLog> for DepositEvent {
    type Error = DecodeError;

    fn try_from(log: &DecodedLog) -> Result<Self, Self::Error> {
        Ok(Self {
            pubkey: log.take("pubkey")?,
            withdrawal_credentials: log.take("withdrawal_credentials")?,
            amount: log.take("amount")?,
            signature: log.take("signature")?,
            index: log.take("index")?,
        })
    }
}
