//! # cellcalc-core
//!
//! Core data structures for the cellcalc formula engine.
//!
//! This crate provides the fundamental types used throughout cellcalc:
//! - [`CellId`], [`RowId`], [`ColumnId`] - Cell addressing and its A1 text form
//! - [`CalculatedResult`] - Exact decimal values produced by evaluation
//!
//! ## Example
//!
//! ```rust
//! use cellcalc_core::{CalculatedResult, CellId};
//!
//! let id: CellId = "B7".parse().unwrap();
//! assert_eq!(id.row.index(), 6);
//!
//! let sum = CalculatedResult::from(17).checked_add(CalculatedResult::from(5)).unwrap();
//! assert_eq!(sum.to_string(), "22");
//! ```

pub mod cell;
pub mod error;

pub use cell::{CalculatedResult, CellId, ColumnId, RowId};
pub use error::{Error, Result};

/// Maximum number of rows addressable by a [`CellId`]
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns addressable by a [`CellId`]
pub const MAX_COLS: u16 = 16_384;
