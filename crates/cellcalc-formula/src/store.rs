//! Keyed stores owned by the evaluator

use crate::ast::Node;
use ahash::AHashMap;
use cellcalc_core::{CalculatedResult, CellId};

/// Read access to memoized cell values
pub trait CalculatedResultsProvider {
    /// Last computed value for a cell, if it has one
    fn get(&self, cell: &CellId) -> Option<CalculatedResult>;
}

/// Last successfully parsed node per cell
///
/// Empty and text cells have no entry.
#[derive(Debug, Default)]
pub struct NodePool {
    nodes: AHashMap<CellId, Node>,
}

impl NodePool {
    pub fn get(&self, cell: &CellId) -> Option<&Node> {
        self.nodes.get(cell)
    }

    pub fn insert(&mut self, cell: CellId, node: Node) {
        self.nodes.insert(cell, node);
    }

    pub fn remove(&mut self, cell: &CellId) -> Option<Node> {
        self.nodes.remove(cell)
    }
}

/// Last computed value per cell
///
/// References read from here instead of re-walking the referenced cell's tree.
#[derive(Debug, Default)]
pub struct CalculatedResultsStore {
    results: AHashMap<CellId, CalculatedResult>,
}

impl CalculatedResultsStore {
    pub fn insert(&mut self, cell: CellId, value: CalculatedResult) {
        self.results.insert(cell, value);
    }

    pub fn remove(&mut self, cell: &CellId) -> Option<CalculatedResult> {
        self.results.remove(cell)
    }
}

impl CalculatedResultsProvider for CalculatedResultsStore {
    fn get(&self, cell: &CellId) -> Option<CalculatedResult> {
        self.results.get(cell).copied()
    }
}
