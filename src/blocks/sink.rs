//! Terminal capture block.

use crate::core::block::Block;
use crate::core::error::{ProcessError, ProcessResult};
use crate::core::naming;
use crate::core::port::{PortSpec, DEFAULT_INPUT};
use crate::core::signal::{Signal, SignalMap};

/// Consumes its single "input" port and keeps the last received signal for
/// inspection. Declares no outputs, so nothing downstream can depend on it.
pub struct Sink {
    name: String,
    ports: PortSpec,
    captured: Option<Signal>,
}

impl Sink {
    /// Kind tag used for default names and diagnostics.
    pub const KIND: &'static str = "sink";

    /// Create a sink with a synthesized name and nothing captured.
    pub fn new() -> Self {
        Self {
            name: naming::global().assign(Self::KIND),
            ports: PortSpec::sink(),
            captured: None,
        }
    }

    /// Replace the synthesized name with an explicit one.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The most recently captured signal, if any.
    pub fn captured(&self) -> Option<&Signal> {
        self.captured.as_ref()
    }
}

impl Default for Sink {
    fn default() -> Self {
        Self::new()
    }
}

impl Block for Sink {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        Self::KIND
    }

    fn ports(&self) -> &PortSpec {
        &self.ports
    }

    fn init(&mut self) {
        self.captured = None;
    }

    fn process(&mut self, inputs: &SignalMap) -> ProcessResult<SignalMap> {
        let signal = inputs.get(DEFAULT_INPUT).ok_or_else(|| ProcessError::MissingInput {
            block: self.name.clone(),
            port: DEFAULT_INPUT.to_string(),
        })?;
        self.captured = Some(signal.clone());
        Ok(SignalMap::new())
    }
}
