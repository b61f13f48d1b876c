//! Error types for homeval.

use thiserror::Error;

use crate::types::Feature;

/// Core error type
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// A request field failed validation
    #[error("Invalid feature input: {0}")]
    InvalidFeature(#[from] FieldError),

    /// Feature count does not match the schema
    #[error("Shape mismatch: expected {expected} features, got {actual}")]
    ShapeMismatch {
        /// Number of features the schema requires
        expected: usize,
        /// Number of features supplied
        actual: usize,
    },

    /// A model or scaler artifact could not be used
    #[error("Artifact error: {0}")]
    ArtifactError(String),

    /// Model inference error
    #[error("Model inference error: {0}")]
    ModelError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}

/// Validation failure for a single request field.
///
/// Fields are checked in schema order and the first failure wins.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Field absent, empty or null
    #[error("missing field {0}")]
    Missing(Feature),

    /// Field present but not a finite number
    #[error("invalid value for {0}")]
    Invalid(Feature),

    /// Field is a number below zero
    #[error("{0} cannot be negative")]
    Negative(Feature),
}

impl FieldError {
    /// The feature that failed validation
    #[must_use]
    pub const fn feature(self) -> Feature {
        match self {
            FieldError::Missing(f) | FieldError::Invalid(f) | FieldError::Negative(f) => f,
        }
    }
}
