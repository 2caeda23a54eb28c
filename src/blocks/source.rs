//! Signal sources.

use crate::core::block::Block;
use crate::core::error::ProcessResult;
use crate::core::naming;
use crate::core::port::{PortSpec, DEFAULT_OUTPUT};
use crate::core::signal::{Signal, SignalMap};

/// Emits a fixed signal on its single "output" port every process call.
///
/// The emitted signal is set at construction and can be swapped later with
/// [`Source::set_signal`]. Declares no inputs, so a source always seeds the
/// ready queue when an order is resolved.
pub struct Source {
    name: String,
    ports: PortSpec,
    signal: Signal,
}

impl Source {
    /// Kind tag used for default names and diagnostics.
    pub const KIND: &'static str = "source";

    /// Create a source emitting `signal`, with a synthesized name.
    pub fn new(signal: Signal) -> Self {
        Self {
            name: naming::global().assign(Self::KIND),
            ports: PortSpec::source(),
            signal,
        }
    }

    /// Create a source that emits silence.
    pub fn silent() -> Self {
        Self::new(Signal::Silence)
    }

    /// Replace the synthesized name with an explicit one.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The signal this source emits.
    pub fn signal(&self) -> &Signal {
        &self.signal
    }

    /// Replace the emitted signal.
    pub fn set_signal(&mut self, signal: Signal) {
        self.signal = signal;
    }
}

impl Default for Source {
    fn default() -> Self {
        Self::silent()
    }
}

impl Block for Source {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        Self::KIND
    }

    fn ports(&self) -> &PortSpec {
        &self.ports
    }

    fn process(&mut self, _inputs: &SignalMap) -> ProcessResult<SignalMap> {
        let mut outputs = SignalMap::new();
        outputs.insert(DEFAULT_OUTPUT.to_string(), self.signal.clone());
        Ok(outputs)
    }
}
