//! Circuit builder.

use std::collections::BTreeSet;

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::noise::NoiseModel;
use crate::parameter::ParameterExpression;
use crate::qubit::{ClbitId, Qubit, QubitId};

macro_rules! fixed_gates {
    ($($method:ident => $gate:ident),* $(,)?) => {
        $(
            pub fn $method(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
                self.gate1(StandardGate::$gate, qubit)
            }
        )*
    };
}

macro_rules! rotation_gates {
    ($($method:ident => $gate:ident),* $(,)?) => {
        $(
            pub fn $method(
                &mut self,
                theta: impl Into<ParameterExpression>,
                qubit: QubitId,
            ) -> IrResult<&mut Self> {
                self.gate1(StandardGate::$gate(theta.into()), qubit)
            }
        )*
    };
}

/// An instruction list over a fixed set of wires.
///
/// Operands are checked on append, so a circuit never references a qubit
/// or classical bit it does not own.
#[derive(Debug, Clone)]
pub struct Circuit {
    name: String,
    qubits: Vec<Qubit>,
    num_clbits: u32,
    instructions: Vec<Instruction>,
    /// Per-wire layer count, kept in step with `instructions`.
    wire_depth: Vec<usize>,
}

impl Circuit {
    /// Empty circuit with no wires.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            num_clbits: 0,
            instructions: vec![],
            wire_depth: vec![],
        }
    }

    /// Circuit with `num_qubits` fresh qubits and `num_clbits` classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        circuit.num_clbits = num_clbits;
        circuit
    }

    /// Append one qubit outside any register and return its id.
    pub fn add_qubit(&mut self) -> QubitId {
        self.push_qubit(None)
    }

    fn push_qubit(&mut self, register: Option<&str>) -> QubitId {
        let id = QubitId(self.qubits.len() as u32);
        self.qubits.push(match register {
            Some(name) => Qubit::with_register(id, name),
            None => Qubit::new(id),
        });
        self.wire_depth.push(0);
        id
    }

    /// Append `size` qubits belonging to register `name`.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let name = name.into();
        (0..size).map(|_| self.push_qubit(Some(&name))).collect()
    }

    /// Append a classical bit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.num_clbits);
        self.num_clbits += 1;
        id
    }

    /// Append `instruction` after checking its operands.
    ///
    /// Nothing is appended on error.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.validate(&instruction)?;

        let wires: Vec<usize> = instruction.qubits.iter().map(|q| q.index()).collect();
        let front = wires.iter().map(|&w| self.wire_depth[w]).max().unwrap_or(0);
        let layer = match instruction.kind {
            InstructionKind::Barrier | InstructionKind::NoiseChannel { .. } => front,
            _ => front + 1,
        };
        for w in wires {
            self.wire_depth[w] = layer;
        }

        self.instructions.push(instruction);
        Ok(self)
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = || Some(instruction.name().to_string());

        let mut seen = BTreeSet::new();
        for &qubit in &instruction.qubits {
            if qubit.index() >= self.qubits.len() {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name(),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name(),
                });
            }
        }
        for &clbit in &instruction.clbits {
            if clbit.0 >= self.num_clbits {
                return Err(IrError::ClbitNotFound { clbit });
            }
        }

        let expected = match &instruction.kind {
            InstructionKind::Gate { gate } => Some(gate.num_qubits()),
            InstructionKind::NoiseChannel { model, .. } => {
                model.validate()?;
                model.arity()
            }
            InstructionKind::Reset | InstructionKind::Delay { .. } => Some(1),
            InstructionKind::Measure | InstructionKind::Barrier => None,
        };
        if let Some(expected) = expected {
            let got = instruction.qubits.len() as u32;
            if got != expected {
                return Err(IrError::QubitCountMismatch {
                    gate_name: instruction.name().to_string(),
                    expected,
                    got,
                });
            }
        }
        Ok(())
    }

    fn gate1(&mut self, gate: StandardGate, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(gate, qubit))
    }

    fn gate2(&mut self, gate: StandardGate, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(gate, q1, q2))
    }

    fixed_gates! {
        h => H,
        x => X,
        y => Y,
        z => Z,
        s => S,
        sdg => Sdg,
        t => T,
        sx => SX,
    }

    rotation_gates! {
        rx => Rx,
        ry => Ry,
        rz => Rz,
    }

    /// `U(θ, φ, λ)`, the general single-qubit rotation.
    pub fn u(
        &mut self,
        theta: impl Into<ParameterExpression>,
        phi: impl Into<ParameterExpression>,
        lambda: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        let gate = StandardGate::U(theta.into(), phi.into(), lambda.into());
        self.gate1(gate, qubit)
    }

    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.gate2(StandardGate::CX, control, target)
    }

    pub fn cz(&mut self, a: QubitId, b: QubitId) -> IrResult<&mut Self> {
        self.gate2(StandardGate::CZ, a, b)
    }

    pub fn swap(&mut self, a: QubitId, b: QubitId) -> IrResult<&mut Self> {
        self.gate2(StandardGate::Swap, a, b)
    }

    /// `exp(-iθ Z⊗Z / 2)`.
    pub fn rzz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        a: QubitId,
        b: QubitId,
    ) -> IrResult<&mut Self> {
        self.gate2(StandardGate::RZZ(theta.into()), a, b)
    }

    /// Toffoli with controls `c1`, `c2`.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CCX, [c1, c2, target]))
    }

    /// Place an explicit noise channel on `qubits`.
    pub fn noise(
        &mut self,
        model: NoiseModel,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::noise_channel(
            model,
            crate::noise::NoiseRole::Resource,
            qubits,
        ))
    }

    /// Measure qubit `i` into classical bit `i`, allocating bits as needed.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        while (self.num_clbits as usize) < self.qubits.len() {
            self.add_clbit();
        }
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        let clbits: Vec<_> = (0..qubits.len() as u32).map(ClbitId).collect();
        self.apply(Instruction::measure(qubits, clbits)?)
    }

    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::reset(qubit))
    }

    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        self.apply(Instruction::barrier(qubits))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    pub fn qubit_ids(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.qubits.iter().map(|q| q.id)
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Number of gates acting on two or more qubits.
    pub fn num_multi_qubit_gates(&self) -> usize {
        self.instructions
            .iter()
            .filter_map(Instruction::as_gate)
            .filter(|g| g.num_qubits() > 1)
            .count()
    }

    /// Longest wire, counting gates, measurements, resets and delays.
    pub fn depth(&self) -> usize {
        self.wire_depth.iter().copied().max().unwrap_or(0)
    }

    /// Whether any gate angle is still symbolic.
    pub fn is_parameterized(&self) -> bool {
        self.instructions
            .iter()
            .filter_map(Instruction::as_gate)
            .any(StandardGate::is_parameterized)
    }

    /// Clone the circuit under a new name.
    #[must_use]
    pub fn copy_as(&self, name: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.name = name.into();
        copy
    }

    /// `(|00⟩ + |11⟩)/√2`, unmeasured.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2, 0);
        circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
        Ok(circuit)
    }

    /// `n`-qubit GHZ state, unmeasured.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_size("ghz", n, 0);
        if n == 0 {
            return Ok(circuit);
        }
        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        Ok(circuit)
    }
}
