//! Formula evaluator
//!
//! Owns the node pool, the dependency graph and the memoized results, and
//! keeps them consistent as cells are updated one at a time.
//!
//! # Example
//!
//! ```rust
//! use cellcalc_core::CellId;
//! use cellcalc_formula::{Evaluator, EvaluatorResult, Node};
//!
//! let a3: CellId = "A3".parse().unwrap();
//! let b7: CellId = "B7".parse().unwrap();
//!
//! let mut evaluator = Evaluator::new();
//! evaluator.update(a3, Node::WholeNumber(17));
//! let result = evaluator.update(b7, Node::Reference(a3));
//!
//! assert!(result.is_success());
//! assert_eq!(evaluator.lookup(&b7).unwrap().to_string(), "17");
//! ```

use crate::ast::{BinaryOperator, Node, MAX_NESTING_DEPTH};
use crate::dependency::DependencyGraph;
use crate::error::{FormulaError, FormulaResult};
use crate::store::{CalculatedResultsProvider, CalculatedResultsStore, NodePool};
use cellcalc_core::{CalculatedResult, CellId, Error};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Options for formula calculation
#[derive(Debug, Clone)]
pub struct CalculationOptions {
    /// Largest absolute exponent accepted by `pow` (default: 999_999_999)
    pub max_exponent: u32,
    /// Allow `pow` with a negative exponent, computed as a reciprocal (default: false)
    pub allow_negative_exponents: bool,
}

impl Default for CalculationOptions {
    fn default() -> Self {
        Self {
            max_exponent: 999_999_999,
            allow_negative_exponents: false,
        }
    }
}

/// Outcome of an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluatorResult {
    /// Cells whose value must be re-read by the caller
    Success(BTreeSet<CellId>),
    Failure(String),
}

impl EvaluatorResult {
    pub fn is_success(&self) -> bool {
        matches!(self, EvaluatorResult::Success(_))
    }

    /// Updated cells, if the update succeeded
    pub fn updated_cells(&self) -> Option<&BTreeSet<CellId>> {
        match self {
            EvaluatorResult::Success(cells) => Some(cells),
            EvaluatorResult::Failure(_) => None,
        }
    }
}

/// The recalculation engine
///
/// Not reentrant: each [`update`](Evaluator::update) runs to completion,
/// including propagation, before the next one may start. Callers on other
/// threads should serialize access (e.g. behind a `Mutex`).
#[derive(Debug, Default)]
pub struct Evaluator {
    options: CalculationOptions,
    nodes: NodePool,
    dependencies: DependencyGraph,
    results: CalculatedResultsStore,
}

impl Evaluator {
    /// Create an evaluator with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluator with custom options
    pub fn with_options(options: CalculationOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &CalculationOptions {
        &self.options
    }

    /// Apply a new node to a cell and recalculate everything observing it
    ///
    /// Empty and text nodes clear the cell. A numeric node is computed
    /// against the current memoized values and only committed if that
    /// succeeds. The cycle check runs after committing: a cell that closes
    /// a cycle keeps its node and value, but nothing downstream is
    /// recalculated and the update reports a failure.
    pub fn update(&mut self, cell: CellId, node: Node) -> EvaluatorResult {
        if node.is_blank() {
            self.clear(cell);
            debug!(%cell, "cleared cell");
            return EvaluatorResult::Success(BTreeSet::from([cell]));
        }

        let computed = match Calculation::new(&self.results, &self.options).run(&node) {
            Ok(computed) => computed,
            Err(e) => {
                warn!(%cell, error = %e, "rejected update");
                return EvaluatorResult::Failure(e.to_string());
            }
        };

        self.nodes.insert(cell, node);
        self.commit(cell, computed);

        if self.dependencies.has_cycle(cell) {
            warn!(%cell, "circular reference detected");
            return EvaluatorResult::Failure(FormulaError::CircularReference.to_string());
        }

        let mut updated = BTreeSet::from([cell]);
        self.propagate(cell, &mut updated);
        debug!(%cell, updated = updated.len(), "updated cell");

        EvaluatorResult::Success(updated)
    }

    /// Last memoized value of a cell
    pub fn lookup(&self, cell: &CellId) -> Option<CalculatedResult> {
        self.results.get(cell)
    }

    /// Stored node of a cell (absent for empty and text cells)
    pub fn node(&self, cell: &CellId) -> Option<&Node> {
        self.nodes.get(cell)
    }

    /// Cells whose formula references the given cell
    pub fn observers(&self, cell: CellId) -> impl Iterator<Item = CellId> + '_ {
        self.dependencies.observers_of(cell)
    }

    pub fn dependencies(&self) -> &DependencyGraph {
        &self.dependencies
    }

    fn clear(&mut self, cell: CellId) {
        self.nodes.remove(&cell);
        self.dependencies.remove_all_edges_for(cell);
        self.results.remove(&cell);
    }

    /// Replace the cell's outgoing edges and memoized value
    fn commit(&mut self, cell: CellId, computed: Computed) {
        self.dependencies.remove_all_edges_for(cell);
        for observed in computed.references {
            self.dependencies.add(observed, cell);
        }
        self.results.insert(cell, computed.value);
    }

    /// Depth-first recalculation of everything observing `changed`
    ///
    /// A cell reachable along several paths is recalculated once per path;
    /// the last visit sees final values for all of its references.
    fn propagate(&mut self, changed: CellId, updated: &mut BTreeSet<CellId>) {
        // One frame of not yet visited observers per level of the walk
        let mut stack = vec![self.dependencies.observer_list(changed).into_iter()];

        while let Some(pending) = stack.last_mut() {
            let Some(observer) = pending.next() else {
                stack.pop();
                continue;
            };

            if self.recalculate(observer) {
                updated.insert(observer);
                stack.push(self.dependencies.observer_list(observer).into_iter());
            }
        }
    }

    /// Recompute a stored cell from current memoized values
    ///
    /// Returns false if the cell has no node.
    fn recalculate(&mut self, cell: CellId) -> bool {
        let Some(node) = self.nodes.get(&cell) else {
            return false;
        };

        match Calculation::new(&self.results, &self.options).run(node) {
            Ok(computed) => self.commit(cell, computed),
            Err(e) => {
                warn!(%cell, error = %e, "recalculation failed");
                self.results.remove(&cell);
            }
        }
        true
    }
}

impl CalculatedResultsProvider for Evaluator {
    fn get(&self, cell: &CellId) -> Option<CalculatedResult> {
        self.lookup(cell)
    }
}

/// Value of a node together with the cells it read
struct Computed {
    value: CalculatedResult,
    references: Vec<CellId>,
}

/// A single structural walk over one cell's tree
struct Calculation<'a> {
    results: &'a CalculatedResultsStore,
    options: &'a CalculationOptions,
    references: Vec<CellId>,
}

impl<'a> Calculation<'a> {
    fn new(results: &'a CalculatedResultsStore, options: &'a CalculationOptions) -> Self {
        Self {
            results,
            options,
            references: Vec::new(),
        }
    }

    fn run(mut self, node: &Node) -> FormulaResult<Computed> {
        let value = self.evaluate(node, 0)?;
        Ok(Computed {
            value,
            references: self.references,
        })
    }

    fn evaluate(&mut self, node: &Node, depth: usize) -> FormulaResult<CalculatedResult> {
        if depth > MAX_NESTING_DEPTH {
            return Err(FormulaError::TooDeeplyNested(MAX_NESTING_DEPTH));
        }

        let value = match node {
            Node::Empty | Node::Text(_) => CalculatedResult::ZERO,
            Node::WholeNumber(n) => CalculatedResult::from(*n),
            Node::DecimalNumber(n) => CalculatedResult::try_from(*n)?,
            Node::Reference(target) => {
                // Snapshot read; never walks into the target's own tree
                self.references.push(*target);
                self.results.get(target).unwrap_or(CalculatedResult::ZERO)
            }
            Node::UnaryMinus(operand) => self.evaluate(operand, depth + 1)?.negate(),
            Node::BinaryOp { op, left, right } => {
                let left = self.evaluate(left, depth + 1)?;
                let right = self.evaluate(right, depth + 1)?;
                match op {
                    BinaryOperator::Add => left.checked_add(right)?,
                    BinaryOperator::Subtract => left.checked_sub(right)?,
                    BinaryOperator::Multiply => left.checked_mul(right)?,
                    BinaryOperator::Divide => left.checked_div(right)?,
                }
            }
            Node::Power { base, exponent } => {
                let base = self.evaluate(base, depth + 1)?;
                let exponent = self.evaluate(exponent, depth + 1)?.to_exact_integer()?;
                self.check_exponent(exponent)?;
                base.powi(exponent)?
            }
        };

        Ok(value)
    }

    fn check_exponent(&self, exponent: i64) -> FormulaResult<()> {
        if exponent < 0 && !self.options.allow_negative_exponents {
            return Err(Error::InvalidExponent(format!("{} is negative", exponent)).into());
        }
        if exponent.unsigned_abs() > u64::from(self.options.max_exponent) {
            return Err(Error::InvalidExponent(format!(
                "{} exceeds the maximum of {}",
                exponent, self.options.max_exponent
            ))
            .into());
        }
        Ok(())
    }
}
