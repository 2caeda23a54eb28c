//! Builtin structural block kinds.
//!
//! These cover the shapes a patch author reaches for first:
//! - [`Source`]: no inputs, emits a configured signal
//! - [`Sink`]: no outputs, captures what it receives
//! - [`Splitter`]: one input fanned out to numbered outputs
//! - [`Mixer`]: numbered inputs summed onto one output
//!
//! All of them are structural only. Filter design, gain staging, and other
//! numeric DSP live outside this crate; a custom kind only has to implement
//! [`crate::core::Block`] to sit in a patch alongside these.

pub mod routing;
pub mod sink;
pub mod source;

pub use routing::{Mixer, Splitter};
pub use sink::Sink;
pub use source::Source;
