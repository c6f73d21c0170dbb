//! Error types and utilities for survcore

use thiserror::Error;

/// Result type alias for survcore operations
pub type Result<T> = std::result::Result<T, SurvCoreError>;

/// Main error type for survcore operations
#[derive(Error, Debug)]
pub enum SurvCoreError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation errors for user input or configuration data
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl SurvCoreError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a validation error for a specific field
    pub fn validation(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = SurvCoreError::config("missing timeout");
        assert_eq!(err.to_string(), "Configuration error: missing timeout");
    }

    #[test]
    fn validation_error_keeps_field() {
        let err = SurvCoreError::validation("must be positive", "requests.timeout_seconds");
        match err {
            SurvCoreError::Validation { field, .. } => {
                assert_eq!(field.as_deref(), Some("requests.timeout_seconds"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
