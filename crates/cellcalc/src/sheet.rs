//! Text-in, values-out access to the evaluator

use crate::error::{Error, Result};
use cellcalc_core::{CalculatedResult, CellId};
use cellcalc_formula::{parse, CalculationOptions, Evaluator, EvaluatorResult};
use std::collections::BTreeSet;
use tracing::debug;

/// A single grid of cells backed by an [`Evaluator`]
///
/// Cells are addressed in A1 form and edited with the same text a user
/// would type: `17`, `hello`, `=A1 * 2`.
///
/// # Example
///
/// ```rust
/// use cellcalc::Sheet;
///
/// let mut sheet = Sheet::new();
/// sheet.set("A1", "10").unwrap();
/// sheet.set("B1", "=A1 + 5").unwrap();
///
/// let updated = sheet.set("A1", "20").unwrap();
/// assert_eq!(updated.len(), 2);
/// assert_eq!(sheet.value("B1").unwrap().unwrap().to_string(), "25");
/// ```
#[derive(Debug, Default)]
pub struct Sheet {
    evaluator: Evaluator,
}

impl Sheet {
    /// Create an empty sheet with default calculation options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sheet with custom calculation options
    pub fn with_options(options: CalculationOptions) -> Self {
        Self {
            evaluator: Evaluator::with_options(options),
        }
    }

    /// Set a cell from raw text and return every cell whose value changed
    ///
    /// Blank text clears the cell. On failure nothing is recalculated, but a
    /// formula that closes a cycle stays stored (see [`Evaluator::update`]).
    pub fn set(&mut self, address: &str, text: &str) -> Result<BTreeSet<CellId>> {
        let cell = CellId::parse(address)?;
        self.set_cell(cell, text)
    }

    /// Same as [`set`](Sheet::set) with an already decoded address
    pub fn set_cell(&mut self, cell: CellId, text: &str) -> Result<BTreeSet<CellId>> {
        let node = parse(text).into_result()?;

        match self.evaluator.update(cell, node) {
            EvaluatorResult::Success(updated) => {
                debug!(%cell, updated = updated.len(), "sheet updated");
                Ok(updated)
            }
            EvaluatorResult::Failure(message) => Err(Error::Rejected { cell, message }),
        }
    }

    /// Clear a cell
    pub fn clear(&mut self, address: &str) -> Result<BTreeSet<CellId>> {
        self.set(address, "")
    }

    /// Current value of a cell; `None` for empty, text and failed cells
    pub fn value(&self, address: &str) -> Result<Option<CalculatedResult>> {
        let cell = CellId::parse(address)?;
        Ok(self.evaluator.lookup(&cell))
    }

    pub fn lookup(&self, cell: &CellId) -> Option<CalculatedResult> {
        self.evaluator.lookup(cell)
    }

    /// Underlying evaluator, for graph and node inspection
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }
}
