//! Noise channel types for the QDM IR.
//!
//! Noise is a first-class instruction: a [`NoiseModel`] attached to one or
//! more qubits describes a completely positive trace-preserving map. The
//! density-matrix engine applies it through its Kraus representation
//! ([`NoiseModel::kraus_operators`]).

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::GateMatrix;

/// A noise channel model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "channel", rename_all = "snake_case")]
#[non_exhaustive]
pub enum NoiseModel {
    /// Depolarizing channel on all operand qubits:
    /// `ρ → (1 - p)·ρ + p·Tr_k(ρ) ⊗ I/2^k`.
    Depolarizing {
        /// Error probability (0.0 to 1.0).
        p: f64,
    },

    /// Amplitude damping: models energy relaxation (T1 decay).
    AmplitudeDamping {
        /// Damping parameter (0.0 to 1.0).
        gamma: f64,
    },

    /// Phase damping: models dephasing (T2 decay without energy loss).
    PhaseDamping {
        /// Dephasing parameter (0.0 to 1.0).
        gamma: f64,
    },

    /// Bit-flip channel: flips |0⟩ ↔ |1⟩ with probability `p`.
    BitFlip {
        /// Flip probability (0.0 to 1.0).
        p: f64,
    },

    /// Phase-flip channel: applies Z with probability `p`.
    PhaseFlip {
        /// Flip probability (0.0 to 1.0).
        p: f64,
    },

    /// Readout error: measurement reports wrong outcome with probability `p`.
    ///
    /// Acts on classical outcomes only; the density matrix is unchanged.
    ReadoutError {
        /// Misclassification probability (0.0 to 1.0).
        p: f64,
    },
}

impl NoiseModel {
    /// Get a human-readable name for this noise model.
    pub fn name(&self) -> &'static str {
        match self {
            NoiseModel::Depolarizing { .. } => "depolarizing",
            NoiseModel::AmplitudeDamping { .. } => "amplitude_damping",
            NoiseModel::PhaseDamping { .. } => "phase_damping",
            NoiseModel::BitFlip { .. } => "bit_flip",
            NoiseModel::PhaseFlip { .. } => "phase_flip",
            NoiseModel::ReadoutError { .. } => "readout_error",
        }
    }

    /// Get the primary error parameter of this noise model.
    pub fn error_param(&self) -> f64 {
        match self {
            NoiseModel::Depolarizing { p }
            | NoiseModel::BitFlip { p }
            | NoiseModel::PhaseFlip { p }
            | NoiseModel::ReadoutError { p } => *p,
            NoiseModel::AmplitudeDamping { gamma } | NoiseModel::PhaseDamping { gamma } => *gamma,
        }
    }

    /// Number of qubits the channel may be applied to; `None` means any.
    pub fn arity(&self) -> Option<u32> {
        match self {
            NoiseModel::Depolarizing { .. } => None,
            _ => Some(1),
        }
    }

    /// Check that the error parameter is a probability.
    pub fn validate(&self) -> IrResult<()> {
        let p = self.error_param();
        if p.is_finite() && (0.0..=1.0).contains(&p) {
            Ok(())
        } else {
            Err(IrError::InvalidNoiseParameter {
                channel: self.name().to_string(),
                value: p,
            })
        }
    }

    /// Whether the channel leaves every state unchanged.
    pub fn is_identity(&self) -> bool {
        matches!(self, NoiseModel::ReadoutError { .. }) || self.error_param() == 0.0
    }

    /// Kraus operators `{K_i}` with `Σ K_i† K_i = I` on `num_qubits` qubits.
    ///
    /// Readout errors yield an empty set: there is nothing to apply to the
    /// quantum state.
    pub fn kraus_operators(&self, num_qubits: u32) -> IrResult<Vec<GateMatrix>> {
        self.validate()?;
        if let Some(expected) = self.arity() {
            if expected != num_qubits {
                return Err(IrError::QubitCountMismatch {
                    gate_name: self.name().to_string(),
                    expected,
                    got: num_qubits,
                });
            }
        }

        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let ops = match *self {
            NoiseModel::Depolarizing { p } => depolarizing_kraus(p, num_qubits),
            NoiseModel::AmplitudeDamping { gamma } => vec![
                GateMatrix::single([one, zero, zero, Complex64::new((1.0 - gamma).sqrt(), 0.0)]),
                GateMatrix::single([zero, Complex64::new(gamma.sqrt(), 0.0), zero, zero]),
            ],
            NoiseModel::PhaseDamping { gamma } => vec![
                GateMatrix::single([one, zero, zero, Complex64::new((1.0 - gamma).sqrt(), 0.0)]),
                GateMatrix::single([zero, zero, zero, Complex64::new(gamma.sqrt(), 0.0)]),
            ],
            NoiseModel::BitFlip { p } => vec![
                pauli(0).scaled((1.0 - p).sqrt()),
                pauli(1).scaled(p.sqrt()),
            ],
            NoiseModel::PhaseFlip { p } => vec![
                pauli(0).scaled((1.0 - p).sqrt()),
                pauli(3).scaled(p.sqrt()),
            ],
            NoiseModel::ReadoutError { .. } => vec![],
        };
        Ok(ops)
    }
}

/// Single-qubit Pauli by index: 0 = I, 1 = X, 2 = Y, 3 = Z.
fn pauli(index: usize) -> GateMatrix {
    let zero = Complex64::new(0.0, 0.0);
    let one = Complex64::new(1.0, 0.0);
    let i = Complex64::new(0.0, 1.0);
    match index {
        0 => GateMatrix::single([one, zero, zero, one]),
        1 => GateMatrix::single([zero, one, one, zero]),
        2 => GateMatrix::single([zero, -i, i, zero]),
        _ => GateMatrix::single([one, zero, zero, -one]),
    }
}

/// Pauli-twirl form of the k-qubit depolarizing channel.
///
/// The uniform average over all `4^k` Pauli strings is the fully
/// depolarizing map, so the identity string carries weight
/// `1 - p + p/4^k` and every other string `p/4^k`.
fn depolarizing_kraus(p: f64, num_qubits: u32) -> Vec<GateMatrix> {
    let count = 1usize << (2 * num_qubits);
    let share = p / count as f64;
    (0..count)
        .map(|word| {
            let mut op = pauli(word & 3);
            for k in 1..num_qubits {
                op = op.kron(&pauli((word >> (2 * k)) & 3));
            }
            let weight = if word == 0 { 1.0 - p + share } else { share };
            op.scaled(weight.sqrt())
        })
        .collect()
}

impl std::fmt::Display for NoiseModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoiseModel::Depolarizing { p } => write!(f, "depolarizing(p={p:.4})"),
            NoiseModel::AmplitudeDamping { gamma } => {
                write!(f, "amplitude_damping(γ={gamma:.4})")
            }
            NoiseModel::PhaseDamping { gamma } => write!(f, "phase_damping(γ={gamma:.4})"),
            NoiseModel::BitFlip { p } => write!(f, "bit_flip(p={p:.4})"),
            NoiseModel::PhaseFlip { p } => write!(f, "phase_flip(p={p:.4})"),
            NoiseModel::ReadoutError { p } => write!(f, "readout_error(p={p:.4})"),
        }
    }
}

/// Semantic role of a noise channel in the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseRole {
    /// Hardware noise attached by the backend noise model.
    Deficit,
    /// Noise written into the circuit on purpose.
    Resource,
}

impl std::fmt::Display for NoiseRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoiseRole::Deficit => write!(f, "deficit"),
            NoiseRole::Resource => write!(f, "resource"),
        }
    }
}
