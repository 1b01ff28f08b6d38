//! Cell-related types
//!
//! This module contains:
//! - [`RowId`], [`ColumnId`] and [`CellId`] - A cell's location (e.g., "A3")
//! - [`CalculatedResult`] - The numeric value computed for a cell

mod address;
mod value;

pub use address::{CellId, ColumnId, RowId};
pub use value::CalculatedResult;
