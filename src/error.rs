//! Error types for method-transform

use std::io;

use thiserror::Error;

/// Result type alias for method-transform
pub type Result<T> = std::result::Result<T, Error>;

/// method-transform errors
///
/// Transformers never fail once built; every variant here is raised while
/// constructing a transformer, loading configuration, or doing CLI I/O.
#[derive(Error, Debug)]
pub enum Error {
    /// Argument validation failed while constructing a transformer
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create an argument validation error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Returns `true` for errors raised by construction-time validation.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
