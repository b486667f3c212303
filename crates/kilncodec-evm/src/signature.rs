//! Selector and event-topic derivation.
//!
//! A function selector is the first 4 bytes of keccak256 over the canonical
//! signature, e.g.:
//!   keccak256("deposit()")[..4] → 0xd0e30db0
//!
//! An event's topics[0] is the full hash of its canonical signature:
//!   keccak256("DepositEvent(bytes,bytes,bytes,bytes,bytes)")
//!   → 0x649bbc62d0e31342afea4e5cd82d4049e7e1ee912fc0889aa790803be39038c5

use tiny_keccak::{Hasher, Keccak};

/// keccak256 of a canonical signature string.
pub fn keccak256_signature(signature: &str) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(signature.as_bytes());
    hasher.finalize(&mut output);
    output
}

/// The 4-byte function selector of a canonical signature string.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256_signature(signature);
    [hash[0], hash[1], hash[2], hash[3]]
}
