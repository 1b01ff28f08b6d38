//! Error types for cellcalc-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cellcalc-core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u32, u16),

    /// Arithmetic failure (division by zero, overflow)
    #[error("{0}")]
    Arithmetic(String),

    /// Exponent that is not an exact integer or is out of range
    #[error("Invalid exponent: {0}")]
    InvalidExponent(String),

    /// Number that has no exact decimal representation
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}

impl Error {
    /// Create a new arithmetic error with a message
    pub fn arithmetic<S: Into<String>>(msg: S) -> Self {
        Error::Arithmetic(msg.into())
    }
}
