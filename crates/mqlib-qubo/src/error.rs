//! Error types for the QUBO crate.

use thiserror::Error;

/// Errors that can occur while building or scoring QUBO data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuboError {
    /// A variable index is outside `0..n`.
    #[error("Variable index {index} out of range for instance of size {size}")]
    InvalidIndex { index: usize, size: usize },

    /// A coefficient is NaN or infinite.
    #[error("Non-finite coefficient {weight} at ({i}, {j})")]
    InvalidWeight { i: usize, j: usize, weight: f64 },

    /// An assignment does not match the instance size.
    #[error("Assignment has {actual} variables, instance has {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// An assignment entry is not 0 or 1.
    #[error("Assignment entry {index} is {value}, expected 0 or 1")]
    InvalidBit { index: usize, value: u8 },

    /// Instance file could not be parsed.
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A reported solution failed validation.
    #[error("Solution validation failed: reported weight {reported}, recomputed {recomputed}")]
    ValidationFailed { reported: f64, recomputed: f64 },

    /// I/O error while reading an instance.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for QUBO operations.
pub type QuboResult<T> = Result<T, QuboError>;
