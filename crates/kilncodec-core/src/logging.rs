//! The logging collaborator used to report unexpected decode failures.
//!
//! Decoders only ever write to it. Nothing it does feeds back into control flow.

/// A sink for decoder diagnostics.
pub trait DecodeLogger: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards to the `tracing` macros under the `kilncodec` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl DecodeLogger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "kilncodec", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "kilncodec", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "kilncodec", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "kilncodec", "{message}");
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl DecodeLogger for NoopLogger {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
