//! Error types for grid conversion.

use std::path::PathBuf;

use cvm_common::CvmError;
use npy_parser::NpyError;
use thiserror::Error;

/// Validation failures detected before any output is written.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Two axes that must describe the same positions differ in length.
    #[error("axis length mismatch: {first} has {first_len} points, {second} has {second_len}")]
    AxisLengthMismatch {
        first: String,
        first_len: usize,
        second: String,
        second_len: usize,
    },

    /// Declared `datapoints` disagrees with the axes or the loaded array.
    #[error("point count mismatch: declared {declared}, {against} has {actual}")]
    PointCountMismatch {
        declared: usize,
        actual: usize,
        against: String,
    },

    /// Loaded array dimensions do not match the descriptor axes.
    #[error("array shape mismatch: expected {expected_rows}x{expected_cols}, got {actual:?}")]
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        actual: Vec<usize>,
    },

    #[error("unknown property kind: {0}")]
    UnknownPropertyKind(String),

    #[error("missing field: {0}")]
    MissingField(String),

    #[error("invalid value for '{field}': {message}")]
    InvalidField { field: String, message: String },

    /// Unsupported combination of flattening options.
    #[error("invalid table configuration: {0}")]
    InvalidConfig(String),

    /// The derived output path would overwrite an input.
    #[error("output file {0} would overwrite an input file")]
    OutputCollision(PathBuf),
}

impl From<CvmError> for ValidationError {
    fn from(err: CvmError) -> Self {
        match err {
            CvmError::UnknownPropertyKind(kind) => Self::UnknownPropertyKind(kind),
            CvmError::MissingField(field) => Self::MissingField(field),
            CvmError::InvalidField { field, message } => Self::InvalidField { field, message },
        }
    }
}

/// Errors that can occur during a conversion run.
#[derive(Error, Debug)]
pub enum TableError {
    /// Wrong number of input files.
    #[error("usage: {0}")]
    Usage(String),

    /// An input or output file could not be opened, read or written.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A descriptor or profile data file is not valid JSON of the expected form.
    #[error("{}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A binary array file could not be decoded.
    #[error("{}: {source}", path.display())]
    Array {
        path: PathBuf,
        #[source]
        source: NpyError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Coarse failure class of a [`TableError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    Io,
    Validation,
}

impl TableError {
    /// Create an Io error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a Parse error for `path`.
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Failure class, used for exit status reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Usage(_) => ErrorKind::Usage,
            Self::Io { .. } => ErrorKind::Io,
            Self::Parse { .. } | Self::Array { .. } | Self::Validation(_) => ErrorKind::Validation,
        }
    }
}

impl From<CvmError> for TableError {
    fn from(err: CvmError) -> Self {
        Self::Validation(err.into())
    }
}

/// Result type for grid conversion operations.
pub type Result<T> = std::result::Result<T, TableError>;
