//! kilncodec-core: foundation types and traits for the KilnCodec decoder.
//!
//! This crate defines:
//! - [`Interface`]: the static description of a contract's functions and events
//! - [`DecodedCall`] / [`DepositEvent`]: the outputs of a successful decode
//! - [`RawLog`]: the input of an event decode
//! - [`CallDecoder`]: the decoder trait every protocol implements
//! - [`DecodeLogger`]: the sink for unexpected decode failures

pub mod call;
pub mod config;
pub mod decoder;
pub mod error;
pub mod event;
pub mod hexutil;
pub mod interface;
pub mod logging;

pub use call::{DecodedCall, DecodedParameter};
pub use config::{DecoderConfig, PublicKeyPolicy};
pub use decoder::CallDecoder;
pub use error::{DecodeError, InterfaceError};
pub use event::{DecodedLog, DepositEvent, RawLog};
pub use interface::{Event, EventParam, Function, Interface, Param, ParamType};
pub use logging::{DecodeLogger, NoopLogger, TracingLogger};
