//! The `CallDecoder` trait: implemented by each protocol decoder.

use crate::call::DecodedCall;
use crate::hexutil::parse_hex;

/// A decoder for the calls of one fixed contract interface.
///
/// Implementations must be `Send + Sync`; decoding is stateless and may run
/// on any thread.
pub trait CallDecoder: Send + Sync {
    /// Returns the protocol name this decoder handles (e.g. `"kiln"`).
    fn protocol(&self) -> &'static str;

    /// Decode raw call data against every function of the interface.
    ///
    /// Returns `None` when the selector is unknown or the payload is
    /// malformed. Never panics on arbitrary input.
    fn decode_call(&self, data: &[u8]) -> Option<DecodedCall>;

    /// Convenience: decode from a hex string (with or without `0x` prefix).
    fn decode_call_hex(&self, hex_str: &str) -> Option<DecodedCall> {
        let bytes = parse_hex(hex_str).ok()?;
        self.decode_call(&bytes)
    }
}
