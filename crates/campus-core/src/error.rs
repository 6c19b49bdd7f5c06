//! Centralized error types for Campus Bridge.

use thiserror::Error;

/// Main error type for Campus Bridge operations.
#[derive(Error, Debug)]
pub enum CampusError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Campus Bridge operations.
pub type CampusResult<T> = Result<T, CampusError>;

impl CampusError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The caller-facing message, without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            Self::ValidationError(msg) | Self::Config(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
