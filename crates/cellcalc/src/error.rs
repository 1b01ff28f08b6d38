//! Error types for the sheet facade

use cellcalc_core::CellId;
use cellcalc_formula::FormulaError;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`Sheet`](crate::Sheet)
#[derive(Debug, Error)]
pub enum Error {
    /// The cell address could not be decoded
    #[error(transparent)]
    Address(#[from] cellcalc_core::Error),

    #[error(transparent)]
    Formula(#[from] FormulaError),

    /// The engine refused the update
    #[error("{cell}: {message}")]
    Rejected { cell: CellId, message: String },
}

impl Error {
    /// Message without the cell prefix
    pub fn message(&self) -> String {
        match self {
            Error::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
