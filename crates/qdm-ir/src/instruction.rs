//! Circuit instructions.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::noise::{NoiseModel, NoiseRole};
use crate::qubit::{ClbitId, QubitId};

/// What an instruction does to its operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum InstructionKind {
    /// Unitary gate.
    Gate { gate: StandardGate },
    /// Computational-basis measurement into `clbits`.
    Measure,
    /// Return the operand to `|0⟩`.
    Reset,
    /// Scheduling fence; no effect on the state.
    Barrier,
    /// Idle for `duration` device ticks; no effect on the state.
    Delay { duration: u64 },
    /// Kraus channel on the operands.
    NoiseChannel {
        model: NoiseModel,
        role: NoiseRole,
    },
}

/// An operation bound to its qubit (and classical bit) operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub qubits: Vec<QubitId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    fn on(kind: InstructionKind, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind,
            qubits: qubits.into_iter().collect(),
            clbits: Vec::new(),
        }
    }

    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::on(InstructionKind::Gate { gate }, qubits)
    }

    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Two-qubit gate; `first` is the control for controlled gates.
    pub fn two_qubit_gate(gate: StandardGate, first: QubitId, second: QubitId) -> Self {
        Self::gate(gate, [first, second])
    }

    /// Measure `qubits[i]` into `clbits[i]`.
    pub fn measure(
        qubits: impl IntoIterator<Item = QubitId>,
        clbits: impl IntoIterator<Item = ClbitId>,
    ) -> IrResult<Self> {
        let mut inst = Self::on(InstructionKind::Measure, qubits);
        inst.clbits = clbits.into_iter().collect();
        if inst.qubits.len() != inst.clbits.len() {
            return Err(IrError::MeasureArity {
                qubits: inst.qubits.len(),
                clbits: inst.clbits.len(),
            });
        }
        Ok(inst)
    }

    pub fn reset(qubit: QubitId) -> Self {
        Self::on(InstructionKind::Reset, [qubit])
    }

    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::on(InstructionKind::Barrier, qubits)
    }

    pub fn delay(qubit: QubitId, duration: u64) -> Self {
        Self::on(InstructionKind::Delay { duration }, [qubit])
    }

    pub fn noise_channel(
        model: NoiseModel,
        role: NoiseRole,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> Self {
        Self::on(InstructionKind::NoiseChannel { model, role }, qubits)
    }

    /// Noise attached by a backend model after a gate.
    pub fn channel_noise(model: NoiseModel, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::noise_channel(model, NoiseRole::Deficit, qubits)
    }

    pub fn is_gate(&self) -> bool {
        self.as_gate().is_some()
    }

    pub fn as_gate(&self) -> Option<&StandardGate> {
        match &self.kind {
            InstructionKind::Gate { gate } => Some(gate),
            _ => None,
        }
    }

    /// The noise model, for noise-channel instructions.
    pub fn as_noise(&self) -> Option<&NoiseModel> {
        match &self.kind {
            InstructionKind::NoiseChannel { model, .. } => Some(model),
            _ => None,
        }
    }

    /// Gate name, or the operation name for non-gates.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate { gate } => gate.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Reset => "reset",
            InstructionKind::Barrier => "barrier",
            InstructionKind::Delay { .. } => "delay",
            InstructionKind::NoiseChannel { .. } => "noise",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::two_qubit_gate(StandardGate::CX, QubitId(1), QubitId(0));
        assert!(inst.is_gate());
        assert_eq!(inst.qubits, vec![QubitId(1), QubitId(0)]);
        assert_eq!(inst.name(), "cx");
        assert!(inst.as_noise().is_none());
    }

    #[test]
    fn test_measure_arity() {
        let inst = Instruction::measure([QubitId(0), QubitId(1)], [ClbitId(0), ClbitId(1)]).unwrap();
        assert_eq!(inst.clbits.len(), 2);
        assert!(matches!(
            Instruction::measure([QubitId(0)], []),
            Err(IrError::MeasureArity { qubits: 1, clbits: 0 })
        ));
    }

    #[test]
    fn test_channel_noise_is_deficit() {
        let model = NoiseModel::Depolarizing { p: 0.03 };
        let inst = Instruction::channel_noise(model.clone(), [QubitId(0), QubitId(1)]);
        assert_eq!(inst.name(), "noise");
        assert_eq!(inst.as_noise(), Some(&model));
        assert!(matches!(
            inst.kind,
            InstructionKind::NoiseChannel { role: NoiseRole::Deficit, .. }
        ));
    }

    #[test]
    fn test_delay_and_barrier_names() {
        assert_eq!(Instruction::delay(QubitId(0), 40).name(), "delay");
        assert_eq!(Instruction::barrier([QubitId(0), QubitId(1)]).qubits.len(), 2);
    }
}
