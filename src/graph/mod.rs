//! Graph construction and ordering.
//!
//! This module provides:
//! - Connection records between block ports ([`connection`])
//! - The patch container with its wiring and alias API ([`patch`])
//! - Execution-order resolution over nested patches ([`resolve`])

pub mod connection;
pub mod patch;
pub mod resolve;

pub use connection::{Connection, Endpoint};
pub use patch::Patch;
pub use resolve::{OrderResolver, Schedule};
