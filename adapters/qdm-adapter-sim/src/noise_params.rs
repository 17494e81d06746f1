//! Backend noise configuration.

use serde::{Deserialize, Serialize};

use qdm_ir::{Instruction, NoiseModel, NoiseRole, QubitId, StandardGate};

use crate::error::{SimError, SimResult};

/// Gate-attached noise applied by the backend after every gate.
///
/// Depolarizing noise acts jointly on all operands of a gate, using the
/// single-qubit rate for one-qubit gates and the two-qubit rate otherwise.
/// The remaining channels act on each operand separately. The readout error
/// is kept for reporting; it does not change the density matrix.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    /// Depolarizing probability after single-qubit gates.
    pub depolarizing_1q: f64,
    /// Depolarizing probability after multi-qubit gates.
    pub depolarizing_2q: f64,
    /// Amplitude damping `γ` per operand.
    pub amplitude_damping: f64,
    /// Phase damping `γ` per operand.
    pub phase_damping: f64,
    /// Bit-flip probability per operand.
    pub bit_flip: f64,
    /// Phase-flip probability per operand.
    pub phase_flip: f64,
    /// Measurement misclassification probability.
    pub readout_error: f64,
}

impl NoiseParams {
    /// No noise at all.
    pub fn noiseless() -> Self {
        Self::default()
    }

    /// Uniform depolarizing noise at rate `p` after every gate.
    pub fn depolarizing(p: f64) -> Self {
        Self {
            depolarizing_1q: p,
            depolarizing_2q: p,
            ..Self::default()
        }
    }

    fn rates(&self) -> [(&'static str, f64); 7] {
        [
            ("depolarizing_1q", self.depolarizing_1q),
            ("depolarizing_2q", self.depolarizing_2q),
            ("amplitude_damping", self.amplitude_damping),
            ("phase_damping", self.phase_damping),
            ("bit_flip", self.bit_flip),
            ("phase_flip", self.phase_flip),
            ("readout_error", self.readout_error),
        ]
    }

    /// Check every rate lies in `[0, 1]`.
    pub fn validate(&self) -> SimResult<()> {
        for (field, value) in self.rates() {
            if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
                return Err(SimError::InvalidNoiseRate { field, value });
            }
        }
        Ok(())
    }

    /// Whether no channel alters the quantum state.
    pub fn is_noiseless(&self) -> bool {
        self.rates()
            .iter()
            .filter(|(field, _)| *field != "readout_error")
            .all(|&(_, v)| v == 0.0)
    }

    /// Noise instructions to append after `gate` acting on `qubits`.
    pub fn channels_for(&self, gate: &StandardGate, qubits: &[QubitId]) -> Vec<Instruction> {
        let mut channels = Vec::new();

        let p = if gate.num_qubits() == 1 {
            self.depolarizing_1q
        } else {
            self.depolarizing_2q
        };
        if p > 0.0 {
            channels.push(Instruction::noise_channel(
                NoiseModel::Depolarizing { p },
                NoiseRole::Deficit,
                qubits.iter().copied(),
            ));
        }

        let per_operand = [
            NoiseModel::AmplitudeDamping {
                gamma: self.amplitude_damping,
            },
            NoiseModel::PhaseDamping {
                gamma: self.phase_damping,
            },
            NoiseModel::BitFlip { p: self.bit_flip },
            NoiseModel::PhaseFlip { p: self.phase_flip },
        ];
        for model in per_operand.iter().filter(|m| !m.is_identity()) {
            for &q in qubits {
                channels.push(Instruction::noise_channel(
                    model.clone(),
                    NoiseRole::Deficit,
                    [q],
                ));
            }
        }
        channels
    }
}
