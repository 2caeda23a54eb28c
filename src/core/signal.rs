//! Signal values that flow through the processing graph.
//!
//! The value system uses an enum-based approach:
//! - Closed set of types: a block pipeline carries a finite set of value kinds
//! - Zero-cost pattern matching: exhaustive matches catch missing cases at compile time
//! - Cheap absence: silence is a variant, not an `Option` wrapper at every port

use std::collections::HashMap;

/// A value carried along a connection during processing.
///
/// Blocks receive one `Signal` per connected input port and produce one per
/// declared output port. The numeric interpretation of a signal belongs to
/// the concrete block kinds, not to the graph core.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// A block of audio samples.
    Samples(Vec<f32>),
    /// A single control value.
    Control(f32),
    /// No value available.
    Silence,
}

impl Signal {
    /// Get the sample block, if this is a `Samples` signal.
    pub fn as_samples(&self) -> Option<&[f32]> {
        match self {
            Signal::Samples(samples) => Some(samples),
            _ => None,
        }
    }

    /// Get the control value, if this is a `Control` signal.
    pub fn as_control(&self) -> Option<f32> {
        match self {
            Signal::Control(value) => Some(*value),
            _ => None,
        }
    }

    /// True if this signal carries no value.
    pub fn is_silence(&self) -> bool {
        matches!(self, Signal::Silence)
    }

    /// Number of samples carried, zero for control values and silence.
    pub fn len(&self) -> usize {
        match self {
            Signal::Samples(samples) => samples.len(),
            _ => 0,
        }
    }

    /// True if this signal carries no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<f32>> for Signal {
    fn from(samples: Vec<f32>) -> Self {
        Signal::Samples(samples)
    }
}

impl From<f32> for Signal {
    fn from(value: f32) -> Self {
        Signal::Control(value)
    }
}

/// Port-name-keyed signal map, the currency of the process contract.
///
/// Inputs arrive as one entry per connected input port; outputs leave as one
/// entry per produced output port.
pub type SignalMap = HashMap<String, Signal>;
