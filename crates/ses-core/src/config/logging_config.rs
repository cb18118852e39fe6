use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_LOG_FILTER;

/// Logging output settings consumed by `tracing_setup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string. Default: "ses=info".
    pub filter: String,
    /// Emit JSON lines instead of human-readable output. Default: false.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            json: false,
        }
    }
}
