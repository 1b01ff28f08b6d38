//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula tokenizing, parsing or evaluation
///
/// The display text of each variant is the message handed back to callers
/// in [`ParseResult::Failure`](crate::ParseResult::Failure) and
/// [`EvaluatorResult::Failure`](crate::EvaluatorResult::Failure).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// Malformed input rejected before parsing
    #[error("{0}")]
    Tokenize(String),

    /// Token stream or literal that cannot be turned into a node
    #[error("{0}")]
    Parse(String),

    /// Unknown function name
    #[error("Unknown text: {0}")]
    UnknownFunction(String),

    /// Reference to invalid cell
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// Arithmetic failure while computing a value
    #[error(transparent)]
    Evaluation(#[from] cellcalc_core::Error),

    /// Tree deeper than [`MAX_NESTING_DEPTH`](crate::ast::MAX_NESTING_DEPTH)
    #[error("Expression is nested deeper than {0} levels")]
    TooDeeplyNested(usize),

    /// Circular reference
    #[error("Cycle detected")]
    CircularReference,
}
