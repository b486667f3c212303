//! # kilncodec-observability
//!
//! Tracing setup for processes that host a KilnCodec decoder.
//!
//! The decoder itself only emits `tracing` events (target `kilncodec`) through
//! `TracingLogger`. This crate installs the subscriber that prints them:
//! a global level, per-component overrides, and text or JSON output.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, LogConfig, ObservabilityError};
