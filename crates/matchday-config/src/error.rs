//! Error types for configuration operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Primary error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was missing.
    #[error("missing environment variable '{name}'")]
    MissingEnv {
        /// Name of the missing environment variable.
        name: &'static str,
    },
    /// Field contained an invalid value.
    #[error("invalid value for '{field}': {message}")]
    InvalidField {
        /// Field that failed validation.
        field: &'static str,
        /// Human-readable error description.
        message: String,
    },
    /// Reading a configuration document failed.
    #[error("failed to read configuration document")]
    DocumentRead {
        /// Path of the unreadable document.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// Parsing a configuration document failed.
    #[error("failed to parse configuration document")]
    DocumentParse {
        /// Underlying serde error.
        source: serde_json::Error,
    },
}
