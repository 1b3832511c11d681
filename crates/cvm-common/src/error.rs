//! Error types for descriptor handling.

use thiserror::Error;

/// Result type alias using CvmError.
pub type CvmResult<T> = Result<T, CvmError>;

/// Errors raised while interpreting a query descriptor.
#[derive(Debug, Error)]
pub enum CvmError {
    #[error("unknown property kind: {0}")]
    UnknownPropertyKind(String),

    #[error("missing field: {0}")]
    MissingField(String),

    #[error("invalid value for '{field}': {message}")]
    InvalidField { field: String, message: String },
}

impl CvmError {
    /// Create an InvalidField error.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }
}
