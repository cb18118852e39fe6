//! Top-level SES configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ClusterConfig, LoggingConfig};
use crate::constants::{LOG_ENV, MAX_CLUSTER_SIZE};
use crate::errors::ConfigError;

/// Environment variable overriding `cluster.size`.
pub const CLUSTER_SIZE_ENV: &str = "SES_CLUSTER_SIZE";
/// Environment variable overriding `cluster.instance_id`.
pub const INSTANCE_ID_ENV: &str = "SES_INSTANCE_ID";

/// Configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`SES_*`)
/// 2. Config file passed to [`SesConfig::load`]
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SesConfig {
    pub cluster: ClusterConfig,
    pub logging: LoggingConfig,
}

impl SesConfig {
    /// Load configuration from a TOML file, apply `SES_*` environment
    /// overrides, then validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let mut config: SesConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    ///
    /// Does not consult the environment and does not validate.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `SES_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply `SES_*` overrides from an arbitrary lookup.
    ///
    /// Unparseable values are ignored and the previous value is kept.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(CLUSTER_SIZE_ENV).and_then(|s| s.trim().parse().ok()) {
            self.cluster.size = v;
        }
        if let Some(v) = lookup(INSTANCE_ID_ENV).and_then(|s| s.trim().parse().ok()) {
            self.cluster.instance_id = v;
        }
        if let Some(filter) = lookup(LOG_ENV) {
            self.logging.filter = filter;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cluster.size == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "cluster.size".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.cluster.size > MAX_CLUSTER_SIZE {
            return Err(ConfigError::ValidationFailed {
                field: "cluster.size".to_string(),
                message: format!("must be at most {MAX_CLUSTER_SIZE}"),
            });
        }
        if self.cluster.instance_id >= self.cluster.size {
            return Err(ConfigError::ValidationFailed {
                field: "cluster.instance_id".to_string(),
                message: format!("must be less than cluster.size ({})", self.cluster.size),
            });
        }
        Ok(())
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
