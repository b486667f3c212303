//! Static interface definition: the functions and events a decoder knows.
//!
//! An [`Interface`] is built once at startup and never mutated. Parameter
//! order is significant: it is the order of the ABI-encoded tuple.

use crate::error::InterfaceError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

// ─── ParamType ────────────────────────────────────────────────────────────────

/// The parameter types the staking interface needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    /// Variable-length byte string (`bytes`).
    Bytes,
    /// Fixed-size byte array (`bytes1` .. `bytes32`). Length in bytes.
    FixedBytes(usize),
    /// Unsigned integer (`uint8` .. `uint256`). Width in bits.
    Uint(usize),
}

impl ParamType {
    /// Returns `true` for types encoded in the tail of an ABI tuple.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Bytes)
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes => write!(f, "bytes"),
            Self::FixedBytes(n) => write!(f, "bytes{n}"),
            Self::Uint(bits) => write!(f, "uint{bits}"),
        }
    }
}

impl FromStr for ParamType {
    type Err = String;

    /// Parses a Solidity type string into its canonical form (`uint` → `uint256`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "bytes" {
            return Ok(Self::Bytes);
        }
        if s == "uint" {
            return Ok(Self::Uint(256));
        }
        if let Some(n) = s.strip_prefix("bytes") {
            return match canonical_width(n) {
                Some(n) if (1..=32).contains(&n) => Ok(Self::FixedBytes(n)),
                _ => Err(format!("invalid fixed bytes type '{s}'")),
            };
        }
        if let Some(bits) = s.strip_prefix("uint") {
            return match canonical_width(bits) {
                Some(b) if b % 8 == 0 && (8..=256).contains(&b) => Ok(Self::Uint(b)),
                _ => Err(format!("invalid uint type '{s}'")),
            };
        }
        Err(format!("unsupported type '{s}'"))
    }
}

/// A type width in canonical decimal: ASCII digits with no sign or leading zero.
fn canonical_width(s: &str) -> Option<usize> {
    if !s.starts_with(|c: char| c.is_ascii_digit() && c != '0') {
        return None;
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

// ─── Items ────────────────────────────────────────────────────────────────────

/// A named function input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: ParamType,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self { name: name.into(), ty }
    }
}

/// A named event input, tagged with whether it is carried in a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventParam {
    pub name: String,
    pub ty: ParamType,
    pub indexed: bool,
}

impl EventParam {
    pub fn new(name: impl Into<String>, ty: ParamType, indexed: bool) -> Self {
        Self { name: name.into(), ty, indexed }
    }
}

/// A contract function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub inputs: Vec<Param>,
}

impl Function {
    pub fn new(name: impl Into<String>, inputs: Vec<Param>) -> Self {
        Self { name: name.into(), inputs }
    }

    /// Canonical signature, e.g. `"requestValidatorsExit(bytes)"`.
    pub fn signature(&self) -> String {
        canonical_signature(&self.name, self.inputs.iter().map(|p| p.ty))
    }
}

/// A contract event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub inputs: Vec<EventParam>,
}

impl Event {
    pub fn new(name: impl Into<String>, inputs: Vec<EventParam>) -> Self {
        Self { name: name.into(), inputs }
    }

    /// Canonical signature over all inputs, indexed or not, in declared order.
    pub fn signature(&self) -> String {
        canonical_signature(&self.name, self.inputs.iter().map(|p| p.ty))
    }

    /// Inputs carried in topics[1..], in declared order.
    pub fn indexed_inputs(&self) -> impl Iterator<Item = &EventParam> {
        self.inputs.iter().filter(|p| p.indexed)
    }

    /// Inputs carried in the data payload, in declared order.
    pub fn data_inputs(&self) -> impl Iterator<Item = &EventParam> {
        self.inputs.iter().filter(|p| !p.indexed)
    }
}

fn canonical_signature(name: &str, types: impl Iterator<Item = ParamType>) -> String {
    let types: Vec<String> = types.map(|t| t.to_string()).collect();
    format!("{}({})", name, types.join(","))
}

// ─── Interface ────────────────────────────────────────────────────────────────

/// A validated, immutable set of functions and events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interface {
    name: String,
    functions: Vec<Function>,
    events: Vec<Event>,
}

impl Interface {
    /// Build an interface, rejecting empty or duplicate names.
    pub fn new(
        name: impl Into<String>,
        functions: Vec<Function>,
        events: Vec<Event>,
    ) -> Result<Self, InterfaceError> {
        let mut seen = HashSet::new();
        for func in &functions {
            check_item(&func.name, func.inputs.iter().map(|p| p.name.as_str()))?;
            if !seen.insert(func.name.as_str()) {
                return Err(InterfaceError::DuplicateFunction {
                    name: func.name.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for event in &events {
            check_item(&event.name, event.inputs.iter().map(|p| p.name.as_str()))?;
            if !seen.insert(event.name.as_str()) {
                return Err(InterfaceError::DuplicateEvent {
                    name: event.name.clone(),
                });
            }
        }

        Ok(Self {
            name: name.into(),
            functions,
            events,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn event(&self, name: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.name == name)
    }
}

/// Unnamed parameters are allowed; named ones must be unique within the item.
fn check_item<'a>(
    item: &str,
    params: impl Iterator<Item = &'a str>,
) -> Result<(), InterfaceError> {
    if item.is_empty() {
        return Err(InterfaceError::EmptyName);
    }
    let mut seen = HashSet::new();
    for param in params.filter(|p| !p.is_empty()) {
        if !seen.insert(param) {
            return Err(InterfaceError::DuplicateParameter {
                item: item.to_string(),
                param: param.to_string(),
            });
        }
    }
    Ok(())
}
