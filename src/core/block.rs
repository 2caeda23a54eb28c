//! Block trait and the passthrough template block.
//!
//! The Block trait is the capability contract every processing unit
//! satisfies: declared port sets, a preparation hook, and a processing
//! operation. Nested graphs implement the same trait, so patches hold leaf
//! blocks and sub-patches uniformly.

use crate::core::error::{ProcessError, ProcessResult};
use crate::core::naming;
use crate::core::port::{PortSpec, DEFAULT_INPUT, DEFAULT_OUTPUT};
use crate::core::signal::SignalMap;
use crate::graph::patch::Patch;
use std::fmt;

/// The core trait for processing blocks.
///
/// # Design
///
/// A block exposes a fixed interface and a two-phase lifecycle:
///
/// 1. **Preparation** (`init`): called once before any processing to set up
///    per-instance state (buffers, coefficients). Defaults to a no-op.
///
/// 2. **Processing** (`process`): maps input-port signals to output-port
///    signals. This is the one mandatory operation; the numeric content of
///    a concrete kind is its own business, the graph only relies on the
///    declared-ports, map-in/map-out shape.
///
/// Port sets are declared per concrete kind and fixed for the life of the
/// block. The graph validates connections against them.
///
/// The `as_patch` hooks are how structure-aware code (the order resolver,
/// the hierarchy printer) descends into nested graphs without knowing
/// concrete kinds; leaf blocks keep the `None` defaults.
///
/// # Thread Safety
///
/// `Send` lets whole patches move between threads. Mutating a patch is
/// exclusive through `&mut`, so no further synchronization is required.
///
/// # Example Implementation
///
/// ```ignore
/// struct Inverter {
///     name: String,
///     ports: PortSpec,
/// }
///
/// impl Block for Inverter {
///     fn name(&self) -> &str {
///         &self.name
///     }
///
///     fn kind(&self) -> &str {
///         "inverter"
///     }
///
///     fn ports(&self) -> &PortSpec {
///         &self.ports
///     }
///
///     fn process(&mut self, inputs: &SignalMap) -> ProcessResult<SignalMap> {
///         let signal = inputs.get("input").cloned().unwrap_or(Signal::Silence);
///         let mut outputs = SignalMap::new();
///         outputs.insert("output".to_string(), invert(signal));
///         Ok(outputs)
///     }
/// }
/// ```
pub trait Block: Send {
    /// The instance name of this block.
    ///
    /// Synthesized from the kind counter at construction unless the caller
    /// supplied one; never changes afterwards.
    fn name(&self) -> &str;

    /// Short lowercase kind tag (e.g. "source", "mixer", "patch").
    ///
    /// Feeds default-name synthesis and diagnostic labels.
    fn kind(&self) -> &str;

    /// The declared port interface of this block.
    fn ports(&self) -> &PortSpec;

    /// Prepare per-instance state before processing.
    ///
    /// Default implementation does nothing.
    fn init(&mut self) {}

    /// Map input-port signals to output-port signals.
    ///
    /// `inputs` holds one entry per connected input port. The returned map
    /// holds one entry per produced output port. Fails with
    /// [`ProcessError::NotImplemented`] on kinds whose processing is not
    /// available, which includes nested patches until an execution driver
    /// exists.
    fn process(&mut self, inputs: &SignalMap) -> ProcessResult<SignalMap>;

    /// Downcast to a nested patch, if this block is one.
    fn as_patch(&self) -> Option<&Patch> {
        None
    }

    /// Mutable downcast to a nested patch, if this block is one.
    fn as_patch_mut(&mut self) -> Option<&mut Patch> {
        None
    }
}

impl fmt::Debug for dyn Block + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("name", &self.name())
            .field("kind", &self.kind())
            .finish()
    }
}

/// A simple passthrough block that copies its input to its output.
///
/// Useful for debugging, as a placeholder in a patch under construction,
/// and as a template for new block kinds.
#[derive(Debug, Clone)]
pub struct Passthrough {
    name: String,
    ports: PortSpec,
}

impl Passthrough {
    /// Kind tag used for default names and diagnostics.
    pub const KIND: &'static str = "passthrough";

    /// Create a passthrough with a synthesized name.
    pub fn new() -> Self {
        Self {
            name: naming::global().assign(Self::KIND),
            ports: PortSpec::mono(),
        }
    }

    /// Replace the synthesized name with an explicit one.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Default for Passthrough {
    fn default() -> Self {
        Self::new()
    }
}

impl Block for Passthrough {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        Self::KIND
    }

    fn ports(&self) -> &PortSpec {
        &self.ports
    }

    fn process(&mut self, inputs: &SignalMap) -> ProcessResult<SignalMap> {
        let signal = inputs
            .get(DEFAULT_INPUT)
            .ok_or_else(|| ProcessError::MissingInput {
                block: self.name.clone(),
                port: DEFAULT_INPUT.to_string(),
            })?;

        let mut outputs = SignalMap::new();
        outputs.insert(DEFAULT_OUTPUT.to_string(), signal.clone());
        Ok(outputs)
    }
}
