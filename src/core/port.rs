//! Port declarations for block inputs and outputs.
//!
//! Ports define the interface of a block - which named connection points it
//! accepts data on and produces data from. Port sets are declared once per
//! concrete block kind and never change after construction.

use std::fmt;

/// Name of the default input port on single-input blocks.
pub const DEFAULT_INPUT: &str = "input";

/// Name of the default output port on single-output blocks.
pub const DEFAULT_OUTPUT: &str = "output";

/// Direction of a port (input or output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortDirection {
    /// A port data flows into.
    Input,
    /// A port data flows out of.
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => write!(f, "input"),
            PortDirection::Output => write!(f, "output"),
        }
    }
}

/// The declared port interface of a block: ordered input names and ordered
/// output names.
///
/// Declaration order is preserved because it is the order an authoring tool
/// presents the ports in; connection validation only cares about membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    inputs: Vec<String>,
    outputs: Vec<String>,
}

impl PortSpec {
    /// Create a port spec from explicit input and output name lists.
    pub fn new<I, O>(inputs: I, outputs: O) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            outputs: outputs.into_iter().map(Into::into).collect(),
        }
    }

    /// The default shape: one "input", one "output".
    pub fn mono() -> Self {
        Self::new([DEFAULT_INPUT], [DEFAULT_OUTPUT])
    }

    /// A pure producer: no inputs, one "output".
    pub fn source() -> Self {
        Self {
            inputs: Vec::new(),
            outputs: vec![DEFAULT_OUTPUT.to_string()],
        }
    }

    /// A pure consumer: one "input", no outputs.
    pub fn sink() -> Self {
        Self {
            inputs: vec![DEFAULT_INPUT.to_string()],
            outputs: Vec::new(),
        }
    }

    /// Declared input port names, in declaration order.
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Declared output port names, in declaration order.
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    /// Check whether `name` is a declared input port.
    pub fn has_input(&self, name: &str) -> bool {
        self.inputs.iter().any(|p| p == name)
    }

    /// Check whether `name` is a declared output port.
    pub fn has_output(&self, name: &str) -> bool {
        self.outputs.iter().any(|p| p == name)
    }

    /// Check for a declared port in the given direction.
    pub fn has_port(&self, name: &str, direction: PortDirection) -> bool {
        match direction {
            PortDirection::Input => self.has_input(name),
            PortDirection::Output => self.has_output(name),
        }
    }
}

impl Default for PortSpec {
    fn default() -> Self {
        Self::mono()
    }
}
