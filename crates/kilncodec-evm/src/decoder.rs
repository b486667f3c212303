//! `KilnDecoder`, the top-level Kiln call-data and log decoder.
//!
//! Every public operation returns `Option`:
//! - `Some`: the bytes are the requested operation and decoded cleanly
//! - `None`: anything else
//!
//! Internally each path produces a `Result<_, DecodeError>`. At the boundary
//! no-match errors are dropped silently, while malformed payloads behind a
//! matching selector are reported to the logger first.

use std::sync::{Arc, OnceLock};

use alloy_primitives::{Selector, B256};
use kilncodec_core::{
    call::DecodedCall,
    config::{DecoderConfig, PublicKeyPolicy},
    decoder::CallDecoder,
    error::{DecodeError, InterfaceError},
    event::{DepositEvent, RawLog},
    hexutil::to_hex,
    interface::Interface,
    logging::{DecodeLogger, TracingLogger},
};
use rayon::prelude::*;

use crate::{
    abi_json::interface_from_abi_json,
    index::{FunctionEntry, SelectorIndex},
    operation::KilnOperation,
    public_keys::{is_whole_keys, PUBLIC_KEY_LENGTH},
    KILN_ABI_JSON,
};

static BUNDLED_INDEX: OnceLock<Arc<SelectorIndex>> = OnceLock::new();

/// The selector index of the bundled Kiln ABI, built on first use.
///
/// # Panics
/// If the bundled ABI is invalid. It is a compile-time constant, so this can
/// only happen on a broken build and must stop the process before any decode.
pub fn bundled_index() -> Arc<SelectorIndex> {
    BUNDLED_INDEX
        .get_or_init(|| match build_kiln_index(bundled_interface()) {
            Ok(index) => Arc::new(index),
            Err(e) => panic!("bundled Kiln ABI is invalid: {e}"),
        })
        .clone()
}

fn bundled_interface() -> Result<Interface, InterfaceError> {
    interface_from_abi_json("Kiln", KILN_ABI_JSON)
}

fn build_kiln_index(
    interface: Result<Interface, InterfaceError>,
) -> Result<SelectorIndex, InterfaceError> {
    let interface = interface?;
    for op in KilnOperation::CALLS {
        op.check(&interface)?;
    }
    KilnOperation::DepositEvent.check(&interface)?;
    SelectorIndex::build(interface)
}

/// Kiln staking decoder.
///
/// Cheap to clone; the selector index is shared.
///
/// # Usage
/// ```rust,no_run
/// use std::sync::Arc;
/// use kilncodec_core::TracingLogger;
/// use kilncodec_evm::KilnDecoder;
///
/// let decoder = KilnDecoder::new(Arc::new(TracingLogger));
/// let call = decoder.decode_deposit(&hex::decode("d0e30db0").unwrap());
/// assert_eq!(call.unwrap().method, "deposit");
/// ```
#[derive(Clone)]
pub struct KilnDecoder {
    index: Arc<SelectorIndex>,
    logger: Arc<dyn DecodeLogger>,
    config: DecoderConfig,
}

impl KilnDecoder {
    /// Create a decoder for the bundled Kiln ABI.
    pub fn new(logger: Arc<dyn DecodeLogger>) -> Self {
        Self::with_config(logger, DecoderConfig::default())
    }

    /// Create a decoder for the bundled Kiln ABI with explicit settings.
    pub fn with_config(logger: Arc<dyn DecodeLogger>, config: DecoderConfig) -> Self {
        Self {
            index: bundled_index(),
            logger,
            config,
        }
    }

    /// Create a decoder for a custom interface (e.g. a newer Kiln ABI).
    ///
    /// # Errors
    /// Returns `InterfaceError` if any Kiln operation is missing or has an
    /// unexpected shape, or if two items share a selector.
    pub fn from_interface(
        interface: Interface,
        logger: Arc<dyn DecodeLogger>,
        config: DecoderConfig,
    ) -> Result<Self, InterfaceError> {
        Ok(Self {
            index: Arc::new(build_kiln_index(Ok(interface))?),
            logger,
            config,
        })
    }

    pub fn index(&self) -> &SelectorIndex {
        &self.index
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    // ─── Function calls ───────────────────────────────────────────────────────

    /// Decode a `deposit()` call. Bytes after the selector are ignored.
    pub fn decode_deposit(&self, data: &[u8]) -> Option<DecodedCall> {
        self.decode_operation(KilnOperation::Deposit, data)
    }

    /// Decode a `requestValidatorsExit(bytes _publicKeys)` call.
    pub fn decode_validators_exit(&self, data: &[u8]) -> Option<DecodedCall> {
        self.decode_operation(KilnOperation::ValidatorsExit, data)
    }

    /// Decode a `batchWithdrawCLFee(bytes _publicKeys)` call.
    pub fn decode_batch_withdraw_cl_fee(&self, data: &[u8]) -> Option<DecodedCall> {
        self.decode_operation(KilnOperation::BatchWithdrawClFee, data)
    }

    /// Classify call data by selector without decoding its parameters.
    pub fn operation_for(&self, data: &[u8]) -> Option<KilnOperation> {
        self.resolve(data).ok()?.operation
    }

    fn decode_operation(&self, expected: KilnOperation, data: &[u8]) -> Option<DecodedCall> {
        let result = self.resolve(data).and_then(|entry| {
            if entry.operation != Some(expected) {
                return Err(DecodeError::WrongOperation {
                    expected: expected.item_name(),
                    found: entry.function.name.clone(),
                    selector: entry.selector.to_string(),
                });
            }
            self.decode_entry(entry, data)
        });
        self.absorb(expected.item_name(), result)
    }

    fn resolve(&self, data: &[u8]) -> Result<&FunctionEntry, DecodeError> {
        if data.len() < 4 {
            return Err(DecodeError::DataTooShort { len: data.len() });
        }
        let selector = Selector::from_slice(&data[..4]);
        self.index
            .function_for(selector)
            .ok_or_else(|| DecodeError::UnknownSelector {
                selector: selector.to_string(),
            })
    }

    fn decode_entry(&self, entry: &FunctionEntry, data: &[u8]) -> Result<DecodedCall, DecodeError> {
        let call = entry.decode(&data[4..])?;

        let carries_keys = matches!(
            entry.operation,
            Some(KilnOperation::ValidatorsExit | KilnOperation::BatchWithdrawClFee)
        );
        if carries_keys && self.config.public_keys == PublicKeyPolicy::WholeKeys {
            if let Some(keys) = call.parameter("_publicKeys") {
                let len = keys.value.len().saturating_sub(2) / 2;
                if !is_whole_keys(len) {
                    return Err(DecodeError::InvalidPublicKeys {
                        len,
                        key_len: PUBLIC_KEY_LENGTH,
                    });
                }
            }
        }
        Ok(call)
    }

    // ─── Event logs ───────────────────────────────────────────────────────────

    /// Decode a `DepositEvent` log.
    ///
    /// Fields are returned exactly as encoded, as hex; `amount` and `index`
    /// are not converted to integers.
    pub fn decode_deposit_event(&self, log: &RawLog) -> Option<DepositEvent> {
        let result = self.try_decode_deposit_event(log);
        self.absorb(KilnOperation::DepositEvent.item_name(), result)
    }

    /// Decode every `DepositEvent` among a receipt's logs, in log order.
    /// Logs that are not deposit events are skipped.
    pub fn decode_deposit_events(&self, logs: &[RawLog]) -> Vec<DepositEvent> {
        logs.par_iter()
            .filter_map(|log| self.decode_deposit_event(log))
            .collect()
    }

    fn try_decode_deposit_event(&self, log: &RawLog) -> Result<DepositEvent, DecodeError> {
        let first = log.topics.first().ok_or(DecodeError::MissingTopics)?;
        let unknown = || DecodeError::UnknownEventSignature {
            signature: to_hex(first),
        };

        let topic = B256::from(log.signature().ok_or_else(unknown)?);
        let entry = self
            .index
            .event_for(&topic)
            .filter(|e| e.operation == Some(KilnOperation::DepositEvent))
            .ok_or_else(unknown)?;

        let decoded = entry.decode(log)?;
        DepositEvent::try_from(&decoded)
    }

    // ─── Boundary ─────────────────────────────────────────────────────────────

    fn absorb<T>(&self, item: &str, result: Result<T, DecodeError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) if e.is_no_match() => None,
            Err(e) => {
                if self.config.report_malformed {
                    self.logger.warn(&format!("Error decoding {item}: {e}"));
                }
                None
            }
        }
    }
}

impl Default for KilnDecoder {
    fn default() -> Self {
        Self::new(Arc::new(TracingLogger))
    }
}

impl CallDecoder for KilnDecoder {
    fn protocol(&self) -> &'static str {
        "kiln"
    }

    fn decode_call(&self, data: &[u8]) -> Option<DecodedCall> {
        match self.resolve(data) {
            Ok(entry) => {
                let result = self.decode_entry(entry, data);
                self.absorb(&entry.function.name, result)
            }
            Err(e) => self.absorb("call", Err(e)),
        }
    }
}
