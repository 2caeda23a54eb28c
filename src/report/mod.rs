//! Textual diagnostics for patches.
//!
//! Everything here is presentation-only, aimed at console and log output:
//! the rendered text is not a stable interface and has no bearing on how a
//! patch resolves.

pub mod order;
pub mod tree;

pub use order::OrderReport;
pub use tree::HierarchyTree;
