//! Core types and traits for the patchbay signal-flow system.
//!
//! This module contains the foundational pieces that the graph layer builds
//! on:
//! - Signal values and the port-keyed signal map
//! - Port declarations (fixed per block kind)
//! - The Block capability trait
//! - Default-name synthesis
//! - Error types

pub mod block;
pub mod error;
pub mod naming;
pub mod port;
pub mod signal;

// Re-export commonly used types
pub use block::{Block, Passthrough};
pub use error::{GraphError, GraphResult, ProcessError, ProcessResult};
pub use naming::NameRegistry;
pub use port::{PortDirection, PortSpec, DEFAULT_INPUT, DEFAULT_OUTPUT};
pub use signal::{Signal, SignalMap};
