//! Host configuration with validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Execution limits of the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Maximum nesting of synchronous calls within one transaction.
    pub max_call_depth: u16,
    /// Maximum logs a single transaction may emit.
    pub max_logs_per_transaction: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_call_depth: 1024,
            max_logs_per_transaction: 10_000,
        }
    }
}

impl HostConfig {
    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidLimit` if any limit is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_call_depth == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_call_depth cannot be 0".into(),
            ));
        }
        if self.max_logs_per_transaction == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_logs_per_transaction cannot be 0".into(),
            ));
        }
        Ok(())
    }

    /// Parses a configuration from JSON, falling back to defaults for
    /// missing fields, and validates it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` on malformed JSON, or the validation error.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Invalid size or count limit.
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Configuration could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(String),
}
