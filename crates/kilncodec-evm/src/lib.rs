//! # kilncodec-evm
//!
//! Kiln staking decoder for EVM call data and event logs.
//!
//! ## Implementation notes
//! - Uses `alloy-core` for ABI decode and `alloy-json-abi` to load the ABI
//! - Call data[0..4] → function selector (keccak256 of the signature)
//! - Topics[0] → event signature hash
//! - Decoded byte values are kept as exact `0x` hex; nothing is reinterpreted

pub mod abi_json;
pub mod decoder;
pub mod index;
pub mod operation;
pub mod params;
pub mod public_keys;
pub mod signature;

/// The bundled Kiln staking contract ABI.
pub const KILN_ABI_JSON: &str = include_str!("../abi/kiln.json");

pub use abi_json::interface_from_abi_json;
pub use decoder::{bundled_index, KilnDecoder};
pub use index::{EventEntry, FunctionEntry, SelectorIndex};
pub use operation::KilnOperation;
pub use public_keys::{split_public_keys, split_public_keys_hex, PUBLIC_KEY_LENGTH};
