//! # cellcalc-formula
//!
//! Formula tokenizer, parser and recalculation engine for cellcalc.
//!
//! This crate provides:
//! - Tokenizing (cell text → tokens)
//! - Parsing (tokens → [`Node`] tree)
//! - Dependency tracking between cells
//! - Incremental evaluation with propagation to dependent cells
//!
//! ## Example
//!
//! ```rust
//! use cellcalc_core::CellId;
//! use cellcalc_formula::{parse, Evaluator};
//!
//! let mut evaluator = Evaluator::new();
//! let a1: CellId = "A1".parse().unwrap();
//! let b1: CellId = "B1".parse().unwrap();
//!
//! evaluator.update(a1, parse("=2 + 3").into_result().unwrap());
//! evaluator.update(b1, parse("=A1 * 2").into_result().unwrap());
//!
//! assert_eq!(evaluator.lookup(&b1).unwrap().to_string(), "10");
//! ```

pub mod ast;
pub mod dependency;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod store;
pub mod tokenizer;

pub use ast::{BinaryOperator, Node, MAX_NESTING_DEPTH};
pub use dependency::DependencyGraph;
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{CalculationOptions, Evaluator, EvaluatorResult};
pub use parser::{parse, ParseResult};
pub use store::{CalculatedResultsProvider, CalculatedResultsStore, NodePool};
pub use tokenizer::{tokenize, Token, TokenResult};
