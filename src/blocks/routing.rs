//! Fan-out and fan-in blocks.

use crate::core::block::Block;
use crate::core::error::{ProcessError, ProcessResult};
use crate::core::naming;
use crate::core::port::{PortSpec, DEFAULT_INPUT};
use crate::core::signal::{Signal, SignalMap};

// ============================================================================
// Splitter
// ============================================================================

/// Copies its single "input" to numbered outputs "out1".."outN".
///
/// The output count is fixed at construction; fewer than one is raised to
/// one.
pub struct Splitter {
    name: String,
    ports: PortSpec,
}

impl Splitter {
    /// Kind tag used for default names and diagnostics.
    pub const KIND: &'static str = "splitter";

    /// Create a splitter with `outputs` numbered output ports.
    pub fn new(outputs: usize) -> Self {
        let outputs = outputs.max(1);
        Self {
            name: naming::global().assign(Self::KIND),
            ports: PortSpec::new(
                [DEFAULT_INPUT],
                (1..=outputs).map(|i| format!("out{i}")),
            ),
        }
    }

    /// Replace the synthesized name with an explicit one.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of output ports.
    pub fn output_count(&self) -> usize {
        self.ports.outputs().len()
    }
}

impl Block for Splitter {
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
        let signal = inputs.get(DEFAULT_INPUT).ok_or_else(|| ProcessError::MissingInput {
            block: self.name.clone(),
            port: DEFAULT_INPUT.to_string(),
        })?;

        let mut outputs = SignalMap::new();
        for port in self.ports.outputs() {
            outputs.insert(port.clone(), signal.clone());
        }
        Ok(outputs)
    }
}

// ============================================================================
// Mixer
// ============================================================================

/// Sums numbered inputs "in1".."inN" onto a single "mix" output.
///
/// Sample blocks add element-wise and must agree on length; control values
/// add arithmetically; the two kinds cannot be mixed in one call. Absent and
/// silent inputs contribute nothing, and a call with no contributing input
/// yields silence. The input count is fixed at construction; fewer than two
/// is raised to two.
pub struct Mixer {
    name: String,
    ports: PortSpec,
}

impl Mixer {
    /// Kind tag used for default names and diagnostics.
    pub const KIND: &'static str = "mixer";

    /// Name of the summed output port.
    pub const MIX_OUTPUT: &'static str = "mix";

    /// Create a mixer with `inputs` numbered input ports.
    pub fn new(inputs: usize) -> Self {
        let inputs = inputs.max(2);
        Self {
            name: naming::global().assign(Self::KIND),
            ports: PortSpec::new(
                (1..=inputs).map(|i| format!("in{i}")),
                [Self::MIX_OUTPUT],
            ),
        }
    }

    /// Replace the synthesized name with an explicit one.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of input ports.
    pub fn input_count(&self) -> usize {
        self.ports.inputs().len()
    }

    fn accumulate(&self, sum: Option<Signal>, signal: &Signal) -> ProcessResult<Option<Signal>> {
        let sum = match sum {
            None => return Ok(Some(signal.clone())),
            Some(sum) => sum,
        };
        match (sum, signal) {
            (Signal::Samples(mut acc), Signal::Samples(block)) => {
                if acc.len() != block.len() {
                    return Err(ProcessError::IncompatibleSignals {
                        block: self.name.clone(),
                        detail: format!(
                            "sample blocks of {} and {} samples",
                            acc.len(),
                            block.len()
                        ),
                    });
                }
                for (slot, sample) in acc.iter_mut().zip(block) {
                    *slot += sample;
                }
                Ok(Some(Signal::Samples(acc)))
            }
            (Signal::Control(acc), Signal::Control(value)) => {
                Ok(Some(Signal::Control(acc + value)))
            }
            _ => Err(ProcessError::IncompatibleSignals {
                block: self.name.clone(),
                detail: "control and sample-block inputs in one call".to_string(),
            }),
        }
    }
}

impl Block for Mixer {
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
        let mut sum = None;
        for port in self.ports.inputs() {
            match inputs.get(port) {
                Some(signal) if !signal.is_silence() => {
                    sum = self.accumulate(sum, signal)?;
                }
                _ => {}
            }
        }

        let mut outputs = SignalMap::new();
        outputs.insert(
            Self::MIX_OUTPUT.to_string(),
            sum.unwrap_or(Signal::Silence),
        );
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(port: &str, values: &[f32]) -> (String, Signal) {
        (port.to_string(), Signal::Samples(values.to_vec()))
    }

    #[test]
    fn test_splitter_port_names() {
        let splitter = Splitter::new(3);
        assert_eq!(splitter.ports().inputs(), ["input"]);
        assert_eq!(splitter.ports().outputs(), ["out1", "out2", "out3"]);
        assert_eq!(splitter.output_count(), 3);
    }

    #[test]
    fn test_splitter_copies_to_every_output() {
        let mut splitter = Splitter::new(2);
        let inputs: SignalMap = [samples("input", &[1.0, 2.0])].into_iter().collect();

        let outputs = splitter.process(&inputs).unwrap();
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs.get("out1"), Some(&Signal::Samples(vec![1.0, 2.0])));
        assert_eq!(outputs.get("out2"), Some(&Signal::Samples(vec![1.0, 2.0])));
    }

    #[test]
    fn test_splitter_floors_at_one_output() {
        assert_eq!(Splitter::new(0).output_count(), 1);
    }

    #[test]
    fn test_mixer_port_names() {
        let mixer = Mixer::new(3);
        assert_eq!(mixer.ports().inputs(), ["in1", "in2", "in3"]);
        assert_eq!(mixer.ports().outputs(), ["mix"]);
        assert_eq!(Mixer::new(0).input_count(), 2);
    }

    #[test]
    fn test_mixer_sums_sample_blocks() {
        let mut mixer = Mixer::new(2);
        let inputs: SignalMap = [
            samples("in1", &[1.0, 2.0, 3.0]),
            samples("in2", &[0.5, 0.5, 0.5]),
        ]
        .into_iter()
        .collect();

        let outputs = mixer.process(&inputs).unwrap();
        assert_eq!(outputs.get("mix"), Some(&Signal::Samples(vec![1.5, 2.5, 3.5])));
    }

    #[test]
    fn test_mixer_adds_control_values() {
        let mut mixer = Mixer::new(2);
        let inputs: SignalMap = [
            ("in1".to_string(), Signal::Control(0.25)),
            ("in2".to_string(), Signal::Control(0.5)),
        ]
        .into_iter()
        .collect();

        let outputs = mixer.process(&inputs).unwrap();
        assert_eq!(outputs.get("mix"), Some(&Signal::Control(0.75)));
    }

    #[test]
    fn test_mixer_rejects_mismatched_block_lengths() {
        let mut mixer = Mixer::new(2).with_name("mx");
        let inputs: SignalMap = [samples("in1", &[1.0, 2.0]), samples("in2", &[1.0])]
            .into_iter()
            .collect();

        let err = mixer.process(&inputs).unwrap_err();
        assert!(matches!(err, ProcessError::IncompatibleSignals { .. }));
    }

    #[test]
    fn test_mixer_rejects_mixed_signal_kinds() {
        let mut mixer = Mixer::new(2);
        let inputs: SignalMap = [
            samples("in1", &[1.0]),
            ("in2".to_string(), Signal::Control(0.5)),
        ]
        .into_iter()
        .collect();

        assert!(mixer.process(&inputs).is_err());
    }

    #[test]
    fn test_mixer_skips_absent_and_silent_inputs() {
        let mut mixer = Mixer::new(3);
        let inputs: SignalMap = [
            samples("in1", &[1.0, 1.0]),
            ("in3".to_string(), Signal::Silence),
        ]
        .into_iter()
        .collect();

        let outputs = mixer.process(&inputs).unwrap();
        assert_eq!(outputs.get("mix"), Some(&Signal::Samples(vec![1.0, 1.0])));
    }

    #[test]
    fn test_mixer_with_nothing_to_mix_emits_silence() {
        let mut mixer = Mixer::new(2);
        let outputs = mixer.process(&SignalMap::new()).unwrap();
        assert_eq!(outputs.get("mix"), Some(&Signal::Silence));
    }
}
