//! Error types.
//!
//! Only configuration loading can fail. Ticking never returns errors.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration was not valid JSON for `AttackerConfig`.
    #[error("failed to parse attacker config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A tuning value is out of range.
    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
