//! Dependency tracking for formula calculation

use ahash::AHashMap;
use cellcalc_core::CellId;
use std::collections::BTreeSet;

/// Dependency graph for formula cells
///
/// Tracks which cells observe (reference) which other cells, enabling
/// recalculation of everything downstream of a change.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Observed cell → cells whose formula references it
    observers: AHashMap<CellId, BTreeSet<CellId>>,
    /// Observing cell → cells its formula references
    observed: AHashMap<CellId, BTreeSet<CellId>>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge: `observing` references `observed`
    pub fn add(&mut self, observed: CellId, observing: CellId) {
        self.observers.entry(observed).or_default().insert(observing);
        self.observed.entry(observing).or_default().insert(observed);
    }

    /// Remove every edge where `observing` is the referencing cell
    pub fn remove_all_edges_for(&mut self, observing: CellId) {
        let Some(observed) = self.observed.remove(&observing) else {
            return;
        };

        for cell in observed {
            if let Some(observers) = self.observers.get_mut(&cell) {
                observers.remove(&observing);
                if observers.is_empty() {
                    self.observers.remove(&cell);
                }
            }
        }
    }

    /// Get cells whose formula references the given cell
    pub fn observers_of(&self, observed: CellId) -> impl Iterator<Item = CellId> + '_ {
        self.observers
            .get(&observed)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Get cells that the given cell's formula references
    pub fn observed_by(&self, observing: CellId) -> impl Iterator<Item = CellId> + '_ {
        self.observed
            .get(&observing)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Detect a cycle reachable from `start` by following observer edges
    ///
    /// Walks with an explicit stack so long chains do not grow the call stack.
    pub fn has_cycle(&self, start: CellId) -> bool {
        let mut visited = BTreeSet::from([start]);
        let mut in_stack = BTreeSet::from([start]);
        // Each frame is a cell and the observers of it not yet visited
        let mut stack = vec![(start, self.observer_list(start))];

        while let Some(frame) = stack.last_mut() {
            let cell = frame.0;
            match frame.1.pop() {
                Some(observer) => {
                    if in_stack.contains(&observer) {
                        return true;
                    }
                    if visited.insert(observer) {
                        in_stack.insert(observer);
                        stack.push((observer, self.observer_list(observer)));
                    }
                }
                None => {
                    in_stack.remove(&cell);
                    stack.pop();
                }
            }
        }

        false
    }

    /// Snapshot of the observers of a cell
    pub(crate) fn observer_list(&self, observed: CellId) -> Vec<CellId> {
        self.observers_of(observed).collect()
    }

    /// Check if there are no edges at all
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}
