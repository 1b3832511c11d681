//! Error types for .npy reading.

use thiserror::Error;

/// Result type for .npy reader operations.
pub type NpyResult<T> = Result<T, NpyError>;

/// Error types for .npy reading.
#[derive(Error, Debug)]
pub enum NpyError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The header or payload was rejected by the decoder
    #[error("invalid .npy data: {0}")]
    Decode(String),

    /// Element type other than 32/64-bit float
    #[error("unsupported element type: {0}")]
    UnsupportedDtype(String),

    /// More than two dimensions
    #[error("unsupported array shape: {0:?}")]
    UnsupportedShape(Vec<u64>),

    /// Header describes an array that cannot exist
    #[error("invalid .npy header: {0}")]
    InvalidHeader(String),

    /// Payload shorter than the header promises
    #[error("truncated array data: expected {expected} bytes, file has {actual}")]
    Truncated { expected: usize, actual: usize },
}
