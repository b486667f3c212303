//! Subscriber setup for the `kilncodec` tracing targets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("invalid log filter '{directives}': {reason}")]
    InvalidFilter { directives: String, reason: String },

    #[error("a global tracing subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}

/// Which decoder diagnostics reach the host's log output, and in what format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Level for every target without an override, e.g. `"warn"`
    #[serde(default = "default_level")]
    pub level: String,
    /// Per-target levels. `kilncodec` carries the decoder's malformed-payload
    /// reports; `kilncodec_evm` carries selector-index construction traces.
    #[serde(default)]
    pub components: BTreeMap<String, String>,
    /// One JSON object per line instead of the plain text format
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            components: BTreeMap::new(),
            json: false,
        }
    }
}

impl LogConfig {
    /// The `EnvFilter` directive string, e.g. `"info,kilncodec=debug"`.
    ///
    /// Component names are crate or target names; dashes become underscores.
    pub fn directives(&self) -> String {
        let mut directives = self.level.clone();
        for (component, level) in &self.components {
            directives.push_str(&format!(",{}={}", component.replace('-', "_"), level));
        }
        directives
    }
}

/// Install the global tracing subscriber.
/// Call once in the host process, before the first decode.
///
/// # Errors
/// Fails on an unparsable level or if a subscriber is already installed.
pub fn init_tracing(config: &LogConfig) -> Result<(), ObservabilityError> {
    let directives = config.directives();
    let filter = EnvFilter::try_new(&directives).map_err(|e| ObservabilityError::InvalidFilter {
        directives: directives.clone(),
        reason: e.to_string(),
    })?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };
    result.map_err(|e| ObservabilityError::AlreadyInitialized(e.to_string()))?;

    tracing::debug!(directives = %directives, json = config.json, "tracing initialised");
    Ok(())
}
