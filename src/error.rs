//! Error types for kNN queries.
//!
//! Every failure is a caller contract violation detected synchronously; the
//! computation itself has no transient failure modes.

use std::fmt;
use thiserror::Error;

/// Classification of a [`KnnError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Feature dimensions differ, or a point buffer is not a whole number of rows.
    ShapeMismatch,
    /// The requested neighbor count is negative.
    InvalidK,
    /// A point set holds NaN or an infinity and the policy rejects it.
    NonFiniteInput,
    /// A configuration value is out of range.
    InvalidArgument,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::ShapeMismatch => write!(f, "SHAPE_MISMATCH"),
            ErrorCode::InvalidK => write!(f, "INVALID_K"),
            ErrorCode::NonFiniteInput => write!(f, "NON_FINITE_INPUT"),
            ErrorCode::InvalidArgument => write!(f, "INVALID_ARGUMENT"),
        }
    }
}

/// Main error type for kNN operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct KnnError {
    code: ErrorCode,
    message: String,
}

impl KnnError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Source and target feature dimensions differ.
    pub fn shape_mismatch(source_dim: usize, target_dim: usize) -> Self {
        Self::new(
            ErrorCode::ShapeMismatch,
            format!(
                "source dimensionality {} does not match target dimensionality {}",
                source_dim, target_dim
            ),
        )
    }

    /// A point buffer does not describe a rectangular `[N, D]` array.
    pub fn ragged(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ShapeMismatch, msg)
    }

    /// Negative neighbor count.
    pub fn invalid_k(k: i64) -> Self {
        Self::new(ErrorCode::InvalidK, format!("k must be >= 0, got {}", k))
    }

    /// Non-finite feature value at `(point, feature)` of the named input.
    pub fn non_finite_input(input: &'static str, point: usize, feature: usize) -> Self {
        Self::new(
            ErrorCode::NonFiniteInput,
            format!(
                "non-finite value in {} at point {}, feature {}",
                input, point, feature
            ),
        )
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, msg)
    }
}

/// Result type alias for kNN operations.
pub type Result<T> = std::result::Result<T, KnnError>;
