//! # cellcalc
//!
//! A small spreadsheet formula engine with incremental recalculation.
//!
//! ## Features
//!
//! - A1-style cell addressing with spreadsheet row and column limits
//! - Exact decimal arithmetic (`+`, `-`, `*`, `/`, unary minus, `pow`)
//! - Dependency tracking with cycle detection
//! - Recalculation of every cell downstream of an edit
//!
//! Operators are applied strictly left to right, without precedence:
//! `=2 + 3 * 4` is `20`.
//!
//! ## Example
//!
//! ```rust
//! use cellcalc::prelude::*;
//!
//! let mut sheet = Sheet::new();
//! sheet.set("A3", "17").unwrap();
//! sheet.set("B7", "=A3").unwrap();
//! sheet.set("C1", "=B7 * 2").unwrap();
//!
//! let updated = sheet.set("A3", "10").unwrap();
//! assert_eq!(updated.len(), 3);
//! assert_eq!(sheet.value("C1").unwrap().unwrap().to_string(), "20");
//! ```

pub mod error;
pub mod prelude;
pub mod sheet;

pub use error::{Error, Result};
pub use sheet::Sheet;

// Re-export core types
pub use cellcalc_core::{CalculatedResult, CellId, ColumnId, RowId, MAX_COLS, MAX_ROWS};

// Re-export formula types
pub use cellcalc_formula::{
    parse, tokenize, BinaryOperator, CalculatedResultsProvider, CalculationOptions,
    DependencyGraph, Evaluator, EvaluatorResult, FormulaError, Node, ParseResult, Token,
    TokenResult, MAX_NESTING_DEPTH,
};
