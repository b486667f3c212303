//! `SelectorIndex`: selector and topic lookup tables derived from an interface.
//!
//! Hashing happens once, in [`SelectorIndex::build`]. After that the index is
//! read-only and can be shared across threads without locking.

use alloy_core::dyn_abi::DynSolType;
use alloy_primitives::{Selector, B256};
use kilncodec_core::{
    call::{DecodedCall, DecodedParameter},
    error::{DecodeError, InterfaceError},
    event::{DecodedLog, RawLog},
    interface::{Event, Function, Interface},
};
use std::collections::HashMap;

use crate::{operation::KilnOperation, params, signature};

/// A function with its precomputed selector and decode types.
#[derive(Debug, Clone)]
pub struct FunctionEntry {
    pub function: Function,
    pub selector: Selector,
    /// The Kiln operation this function backs, if any
    pub operation: Option<KilnOperation>,
    types: Vec<DynSolType>,
}

impl FunctionEntry {
    /// Decode the ABI-encoded inputs that follow the selector.
    pub fn decode(&self, input_data: &[u8]) -> Result<DecodedCall, DecodeError> {
        let values = params::decode_params(&self.function.name, input_data, &self.types)?;

        let parameters = self
            .function
            .inputs
            .iter()
            .zip(values)
            .enumerate()
            .map(|(i, (param, value))| DecodedParameter {
                name: param_name(&param.name, i),
                ty: param.ty.to_string(),
                value,
                value_decoded: None,
            })
            .collect();

        Ok(DecodedCall {
            method: self.function.name.clone(),
            parameters,
        })
    }
}

/// An event with its precomputed topic and data-payload types.
#[derive(Debug, Clone)]
pub struct EventEntry {
    pub event: Event,
    pub topic: B256,
    /// The Kiln operation this event backs, if any
    pub operation: Option<KilnOperation>,
    data_types: Vec<DynSolType>,
}

impl EventEntry {
    /// Decode indexed fields from topics[1..] and the rest from `data`.
    ///
    /// Fields come back in declared order regardless of where they were carried.
    pub fn decode(&self, log: &RawLog) -> Result<DecodedLog, DecodeError> {
        let name = &self.event.name;
        let mut data_values =
            params::decode_params(name, &log.data, &self.data_types)?.into_iter();
        let mut topics = log.topics.iter().skip(1);

        let mut fields = Vec::with_capacity(self.event.inputs.len());
        for (i, input) in self.event.inputs.iter().enumerate() {
            let value = if input.indexed {
                let topic = topics.next().ok_or_else(|| DecodeError::MissingField {
                    field: param_name(&input.name, i),
                })?;
                params::decode_topic(name, topic, input.ty)?
            } else {
                data_values.next().ok_or_else(|| DecodeError::MissingField {
                    field: param_name(&input.name, i),
                })?
            };
            fields.push((param_name(&input.name, i), value));
        }

        Ok(DecodedLog {
            event: name.clone(),
            fields,
        })
    }
}

fn param_name(name: &str, i: usize) -> String {
    if name.is_empty() {
        format!("arg{i}")
    } else {
        name.to_string()
    }
}

/// Lookup tables from selector → function and topic → event.
#[derive(Debug, Clone)]
pub struct SelectorIndex {
    interface: Interface,
    functions: HashMap<Selector, FunctionEntry>,
    events: HashMap<B256, EventEntry>,
}

impl SelectorIndex {
    /// Hash every function and event signature of `interface`.
    ///
    /// # Errors
    /// Two functions sharing a selector (or two events sharing a topic) is a
    /// broken interface and fails here rather than at decode time.
    pub fn build(interface: Interface) -> Result<Self, InterfaceError> {
        let mut functions: HashMap<Selector, FunctionEntry> = HashMap::new();
        for func in interface.functions() {
            let selector = Selector::from(signature::selector(&func.signature()));
            if let Some(existing) = functions.get(&selector) {
                return Err(InterfaceError::SelectorCollision {
                    selector: selector.to_string(),
                    first: existing.function.name.clone(),
                    second: func.name.clone(),
                });
            }
            let entry = FunctionEntry {
                function: func.clone(),
                selector,
                operation: KilnOperation::from_item_name(&func.name).filter(|op| op.is_call()),
                types: func.inputs.iter().map(|p| params::to_dyn_type(p.ty)).collect(),
            };
            functions.insert(selector, entry);
        }

        let mut events: HashMap<B256, EventEntry> = HashMap::new();
        for event in interface.events() {
            let topic = B256::from(signature::keccak256_signature(&event.signature()));
            if let Some(existing) = events.get(&topic) {
                return Err(InterfaceError::SelectorCollision {
                    selector: topic.to_string(),
                    first: existing.event.name.clone(),
                    second: event.name.clone(),
                });
            }
            let entry = EventEntry {
                event: event.clone(),
                topic,
                operation: KilnOperation::from_item_name(&event.name).filter(|op| !op.is_call()),
                data_types: event.data_inputs().map(|p| params::to_dyn_type(p.ty)).collect(),
            };
            events.insert(topic, entry);
        }

        tracing::debug!(
            interface = interface.name(),
            functions = functions.len(),
            events = events.len(),
            "built selector index"
        );

        Ok(Self {
            interface,
            functions,
            events,
        })
    }

    pub fn interface(&self) -> &Interface {
        &self.interface
    }

    /// Look up a function by the first 4 bytes of call data.
    pub fn function_for(&self, selector: Selector) -> Option<&FunctionEntry> {
        self.functions.get(&selector)
    }

    /// Look up an event by its signature hash (topics[0]).
    pub fn event_for(&self, topic: &B256) -> Option<&EventEntry> {
        self.events.get(topic)
    }

    /// The selector of a named function.
    pub fn selector_of(&self, name: &str) -> Option<Selector> {
        self.functions
            .values()
            .find(|e| e.function.name == name)
            .map(|e| e.selector)
    }

    /// The signature topic of a named event.
    pub fn topic_of(&self, name: &str) -> Option<B256> {
        self.events
            .values()
            .find(|e| e.event.name == name)
            .map(|e| e.topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kilncodec_core::interface::{EventParam, Param, ParamType};

    fn kiln_index() -> SelectorIndex {
        let iface = crate::interface_from_abi_json("Kiln", crate::KILN_ABI_JSON).unwrap();
        SelectorIndex::build(iface).unwrap()
    }

    #[test]
    fn kiln_selectors() {
        let idx = kiln_index();
        assert_eq!(idx.selector_of("deposit").unwrap().to_string(), "0xd0e30db0");
        assert_eq!(idx.selector_of("requestValidatorsExit").unwrap().to_string(), "0xb6b06dec");
        assert_eq!(idx.selector_of("batchWithdrawCLFee").unwrap().to_string(), "0x0ffab6c2");
        assert_eq!(
            idx.topic_of("DepositEvent").unwrap().to_string(),
            "0x649bbc62d0e31342afea4e5cd82d4049e7e1ee912fc0889aa790803be39038c5"
        );
    }

    #[test]
    fn lookup_resolves_operation() {
        let idx = kiln_index();
        let entry = idx.function_for(Selector::from([0xd0, 0xe3, 0x0d, 0xb0])).unwrap();
        assert_eq!(entry.function.name, "deposit");
        assert_eq!(entry.operation, Some(KilnOperation::Deposit));
        assert!(idx.function_for(Selector::from([0xa9, 0x05, 0x9c, 0xbb])).is_none());

        let topic = idx.topic_of("DepositEvent").unwrap();
        assert_eq!(idx.event_for(&topic).unwrap().operation, Some(KilnOperation::DepositEvent));
        assert!(idx.event_for(&B256::ZERO).is_none());
    }

    #[test]
    fn foreign_items_have_no_operation() {
        let iface = Interface::new(
            "Other",
            vec![Function::new("withdraw", vec![Param::new("amount", ParamType::Uint(256))])],
            vec![],
        )
        .unwrap();
        let idx = SelectorIndex::build(iface).unwrap();
        assert_eq!(idx.selector_of("withdraw").and_then(|s| idx.function_for(s)).unwrap().operation, None);
    }

    #[test]
    fn selector_collision_rejected() {
        // Both hash to 0x42966c68
        let iface = Interface::new(
            "Clash",
            vec![
                Function::new("burn", vec![Param::new("amount", ParamType::Uint(256))]),
                Function::new(
                    "collate_propagate_storage",
                    vec![Param::new("x", ParamType::FixedBytes(16))],
                ),
            ],
            vec![],
        )
        .unwrap();
        assert!(matches!(
            SelectorIndex::build(iface),
            Err(InterfaceError::SelectorCollision { .. })
        ));
    }

    #[test]
    fn event_decode_mixes_topics_and_data() {
        let ev = Event::new(
            "Tagged",
            vec![
                EventParam::new("id", ParamType::Uint(64), true),
                EventParam::new("payload", ParamType::Bytes, false),
            ],
        );
        let iface = Interface::new("T", vec![], vec![ev]).unwrap();
        let idx = SelectorIndex::build(iface).unwrap();
        let topic = idx.topic_of("Tagged").unwrap();

        let mut id = vec![0u8; 32];
        id[31] = 7;
        let mut data = vec![0u8; 32];
        data[31] = 0x20;
        data.extend_from_slice(&[0u8; 31]);
        data.push(2);
        data.extend_from_slice(&[0xaa, 0xbb]);
        data.extend_from_slice(&[0u8; 30]);

        let log = RawLog::new(data, vec![topic.to_vec(), id]);
        let decoded = idx.event_for(&topic).unwrap().decode(&log).unwrap();
        assert_eq!(decoded.field("id"), Some("7"));
        assert_eq!(decoded.field("payload"), Some("0xaabb"));

        let missing_topic = RawLog::new(log.data.clone(), vec![topic.to_vec()]);
        assert_eq!(
            idx.event_for(&topic).unwrap().decode(&missing_topic),
            Err(DecodeError::MissingField { field: "id".into() })
        );
    }
}
