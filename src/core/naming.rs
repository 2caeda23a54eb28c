//! Default-name synthesis for blocks.
//!
//! Every block gets a name at construction. Callers may pass one explicitly;
//! otherwise one is synthesized as `<kind>_<n>` from a per-kind counter.
//! Counters live in an explicit registry rather than hidden per-type statics
//! so tests can reset them and embedders can run isolated registries.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Per-kind instance counters behind a single lock.
///
/// Counting is process-wide when used through [`global()`]; increments are
/// serialized, so concurrently constructed blocks of the same kind always
/// receive distinct names.
#[derive(Debug, Default)]
pub struct NameRegistry {
    counters: Mutex<HashMap<String, u64>>,
}

impl NameRegistry {
    /// Create an empty registry with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next name for `kind`: "kind_1", "kind_2", ...
    ///
    /// The counter advances on every call, including calls made on behalf of
    /// blocks that end up renamed, so default names never collide with each
    /// other within one registry.
    pub fn assign(&self, kind: &str) -> String {
        let mut counters = self.counters.lock();
        let counter = counters.entry(kind.to_string()).or_insert(0);
        *counter += 1;
        format!("{}_{}", kind, counter)
    }

    /// Number of names assigned so far for `kind`.
    pub fn count(&self, kind: &str) -> u64 {
        self.counters.lock().get(kind).copied().unwrap_or(0)
    }

    /// Reset the counter for one kind; the next assignment restarts at 1.
    pub fn reset(&self, kind: &str) {
        self.counters.lock().remove(kind);
    }

    /// Reset every counter in the registry.
    pub fn reset_all(&self) {
        self.counters.lock().clear();
    }
}

/// The process-wide registry that block constructors draw from.
pub fn global() -> &'static NameRegistry {
    static GLOBAL: OnceLock<NameRegistry> = OnceLock::new();
    GLOBAL.get_or_init(NameRegistry::new)
}
