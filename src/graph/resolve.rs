//! Execution-order resolution over the patch hierarchy.
//!
//! Kahn's algorithm runs once per patch level: children with no upstream
//! dependencies seed a FIFO queue in registration order, and finishing a
//! child releases its downstream edges. A nested patch contributes its own
//! resolved children in place of itself, each entry prefixed with the nested
//! patch's local name, so the final schedule holds only leaf blocks under
//! dot-qualified names.
//!
//! Ties break by registration order, which keeps the schedule deterministic
//! for a given construction sequence. If any level drains its queue before
//! every child is placed, the remaining children form at least one cycle and
//! resolution fails naming them.

use crate::core::error::{GraphError, GraphResult};
use crate::graph::patch::Patch;
use indexmap::IndexMap;
use log::{debug, trace};
use std::collections::{HashSet, VecDeque};

// ============================================================================
// Schedule
// ============================================================================

/// An immutable, ordered plan of dot-qualified leaf names.
///
/// Produced by [`OrderResolver::resolve`]; a snapshot of the patch at
/// resolution time, unaffected by later edits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schedule {
    entries: Vec<String>,
}

impl Schedule {
    /// The qualified names in execution order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of scheduled leaves.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the qualified names in order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Resolves the execution order of every leaf block under a patch.
pub struct OrderResolver<'a> {
    patch: &'a Patch,
}

impl<'a> OrderResolver<'a> {
    /// Create a resolver rooted at `patch`.
    pub fn new(patch: &'a Patch) -> Self {
        Self { patch }
    }

    /// Produce the schedule, or fail with [`GraphError::CircularDependency`]
    /// naming the qualified blocks left unplaced at the offending level.
    pub fn resolve(&self) -> GraphResult<Schedule> {
        let mut entries = Vec::new();
        Self::resolve_level(self.patch, "", &mut entries)?;

        debug!(
            "resolved '{}': {} leaf blocks scheduled",
            self.patch.name(),
            entries.len()
        );
        Ok(Schedule { entries })
    }

    /// True if resolution would fail on a cycle.
    pub fn has_cycle(&self) -> bool {
        self.resolve().is_err()
    }

    /// Run Kahn's algorithm over one patch level, appending qualified names
    /// to `out`. `prefix` is either empty or ends with a dot.
    fn resolve_level(patch: &Patch, prefix: &str, out: &mut Vec<String>) -> GraphResult<()> {
        // Upstream name sets, keyed by child in registration order. Two
        // connections between the same pair collapse to one dependency.
        let mut upstream: IndexMap<&str, HashSet<&str>> =
            patch.blocks().map(|(name, _)| (name, HashSet::new())).collect();
        for connection in patch.connections() {
            if let Some(sources) = upstream.get_mut(connection.to.block.as_str()) {
                sources.insert(connection.from.block.as_str());
            }
        }

        let mut queue: VecDeque<&str> = upstream
            .iter()
            .filter(|(_, sources)| sources.is_empty())
            .map(|(name, _)| *name)
            .collect();

        let mut placed: HashSet<&str> = HashSet::new();
        while let Some(current) = queue.pop_front() {
            placed.insert(current);
            trace!("place '{prefix}{current}'");

            match patch.get(current).and_then(|block| block.as_patch()) {
                Some(nested) => {
                    let nested_prefix = format!("{prefix}{current}.");
                    Self::resolve_level(nested, &nested_prefix, out)?;
                }
                None => out.push(format!("{prefix}{current}")),
            }

            for (name, sources) in upstream.iter_mut() {
                if sources.remove(current) && sources.is_empty() {
                    queue.push_back(*name);
                }
            }
        }

        if placed.len() < patch.block_count() {
            let names = upstream
                .keys()
                .filter(|name| !placed.contains(*name))
                .map(|name| format!("{prefix}{name}"))
                .collect();
            return Err(GraphError::CircularDependency { names });
        }
        Ok(())
    }
}
