//! Error types for Vobla

use crate::status::Status;
use std::io;
use thiserror::Error;

/// Result type alias for Vobla operations
pub type Result<T> = std::result::Result<T, VoblaError>;

/// Main error type for Vobla
#[derive(Error, Debug)]
pub enum VoblaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Command line parsing errors
    #[error("{0}")]
    Cli(#[from] clap::Error),

    /// A failed command status surfaced through `?`
    #[error("{0}")]
    Status(Status),
}

/// Configuration lookup and loading errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to find config file (searched: {0})")]
    NotFound(String),

    #[error("Key '{0}' not found")]
    KeyNotFound(String),

    #[error("Bad value for '{key}': {value:?}")]
    BadValue { key: String, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl From<VoblaError> for Status {
    fn from(err: VoblaError) -> Self {
        match err {
            VoblaError::Status(status) => status,
            VoblaError::Io(e) => Status::from(e),
            other => Status::new(-1, other.to_string()),
        }
    }
}

impl From<ConfigError> for Status {
    fn from(err: ConfigError) -> Self {
        Status::new(-1, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_passes_through() {
        let err = VoblaError::Status(Status::new(7, "seven"));
        assert_eq!(Status::from(err), Status::new(7, "seven"));
    }

    #[test]
    fn test_config_error_becomes_failure() {
        let status = Status::from(VoblaError::from(ConfigError::KeyNotFound("a.b".into())));
        assert!(!status.is_ok());
        assert_eq!(status.code(), -1);
        assert!(status.message().contains("a.b"));
    }
}
