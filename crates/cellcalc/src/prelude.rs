//! Prelude module - common imports for cellcalc users
//!
//! ```rust
//! use cellcalc::prelude::*;
//! ```

pub use crate::{
    // Addressing and values
    CalculatedResult,
    // Calculation types
    CalculationOptions,
    CellId,
    // Error types
    Error,
    Evaluator,
    EvaluatorResult,
    Node,
    ParseResult,
    Result,
    // Main types
    Sheet,
};
