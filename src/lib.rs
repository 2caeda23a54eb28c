//! # Patchbay - Hierarchical Signal-Flow Graphs
//!
//! Patchbay models block-based DSP pipelines as directed graphs of named
//! processing blocks and computes a safe execution order before any sample
//! runs through them. Blocks declare named input and output ports, patches
//! wire ports together and nest inside each other, and the resolver
//! flattens the whole hierarchy into one correctly-ordered sequence while
//! rejecting cycles.
//!
//! ## Features
//!
//! - **Named Ports**: Every block declares its input and output port names;
//!   wiring is validated against the declarations at connect time
//! - **Nested Patches**: A patch is itself a block, so sub-graphs compose to
//!   arbitrary depth and present an aggregate interface through port aliases
//! - **Deterministic Ordering**: Kahn's algorithm per level with
//!   registration-order tie-breaking, recursive over nested patches
//! - **Explicit Cycle Detection**: Resolution fails with the names of the
//!   blocks caught in a cycle instead of returning a partial order
//! - **Console Diagnostics**: Hierarchy trees, connection annotations, and
//!   numbered order listings for quick inspection
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use patchbay::prelude::*;
//!
//! // Build a patch
//! let mut patch = Patch::new().with_name("Master");
//! patch.add("src", Source::silent()).unwrap();
//! patch.add("split", Splitter::new(2)).unwrap();
//! patch.add("mix", Mixer::new(2)).unwrap();
//! patch.add("out", Sink::new()).unwrap();
//!
//! // Wire ports together
//! patch.chain("src", "split").unwrap();
//! patch.connect("split", "out1", "mix", "in1").unwrap();
//! patch.connect("split", "out2", "mix", "in2").unwrap();
//! patch.connect("mix", "mix", "out", "input").unwrap();
//!
//! // Resolve the execution order
//! let schedule = patch.resolve().unwrap();
//! assert_eq!(schedule.len(), 4);
//!
//! // Inspect
//! println!("{}", HierarchyTree::new(&patch).with_connections());
//! println!("{}", OrderReport::new(&patch).render().unwrap());
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`core`]: the block contract, signals, ports, naming, and errors
//! - [`graph`]: patch structure, connections, and order resolution
//! - [`blocks`]: builtin structural kinds (source, sink, splitter, mixer)
//! - [`report`]: presentation-only console diagnostics
//!
//! ## Creating Custom Blocks
//!
//! Implement the [`core::Block`] trait to create custom kinds:
//!
//! ```rust,ignore
//! use patchbay::prelude::*;
//!
//! /// Copies "input" to "output" and counts how often it ran.
//! struct Tap {
//!     name: String,
//!     ports: PortSpec,
//!     seen: usize,
//! }
//!
//! impl Tap {
//!     fn new(name: &str) -> Self {
//!         Self {
//!             name: name.to_string(),
//!             ports: PortSpec::mono(),
//!             seen: 0,
//!         }
//!     }
//! }
//!
//! impl Block for Tap {
//!     fn name(&self) -> &str {
//!         &self.name
//!     }
//!
//!     fn kind(&self) -> &str {
//!         "tap"
//!     }
//!
//!     fn ports(&self) -> &PortSpec {
//!         &self.ports
//!     }
//!
//!     fn process(&mut self, inputs: &SignalMap) -> ProcessResult<SignalMap> {
//!         self.seen += 1;
//!         let mut outputs = SignalMap::new();
//!         if let Some(signal) = inputs.get(DEFAULT_INPUT) {
//!             outputs.insert(DEFAULT_OUTPUT.to_string(), signal.clone());
//!         }
//!         Ok(outputs)
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod blocks;
pub mod core;
pub mod graph;
pub mod report;

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
/// ```rust,ignore
/// use patchbay::prelude::*;
/// ```
pub mod prelude {
    // Block contract
    pub use crate::core::block::{Block, Passthrough};

    // Signals and ports
    pub use crate::core::port::{PortDirection, PortSpec, DEFAULT_INPUT, DEFAULT_OUTPUT};
    pub use crate::core::signal::{Signal, SignalMap};

    // Naming
    pub use crate::core::naming::NameRegistry;

    // Errors
    pub use crate::core::error::{GraphError, GraphResult, ProcessError, ProcessResult};

    // Graph
    pub use crate::graph::connection::{Connection, Endpoint};
    pub use crate::graph::patch::Patch;
    pub use crate::graph::resolve::{OrderResolver, Schedule};

    // Built-in blocks
    pub use crate::blocks::{Mixer, Sink, Source, Splitter};

    // Reports
    pub use crate::report::{HierarchyTree, OrderReport};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
