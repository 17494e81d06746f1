//! Statevector simulation engine for noiseless reference runs.

use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

use qdm_ir::{GateMatrix, Instruction, InstructionKind, StandardGate};

use crate::density_matrix::DensityMatrix;
use crate::error::{SimError, SimResult};
use crate::kernel::{apply_local, local_offsets, operand_mask};

/// Pure state `|ψ⟩` as `2^n` amplitudes, qubit `q` on bit `q`.
#[derive(Debug, Clone)]
pub struct Statevector {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl Statevector {
    /// `|0…0⟩`.
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Register width.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// State amplitudes indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// `⟨ψ|ψ⟩`.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// `|ψ⟩⟨ψ|`.
    pub fn to_density_matrix(&self) -> SimResult<DensityMatrix> {
        DensityMatrix::from_statevector(&self.amplitudes)
    }

    /// Apply one instruction.
    ///
    /// Reset and noise channels yield mixed states and are rejected.
    pub fn apply(&mut self, instruction: &Instruction) -> SimResult<()> {
        match &instruction.kind {
            InstructionKind::Gate { gate } => {
                let qubits: Vec<_> = instruction.qubits.iter().map(|q| q.index()).collect();
                self.apply_gate(gate, &qubits)
            }
            InstructionKind::NoiseChannel { .. } => Err(SimError::NoiseRequiresDensityMatrix),
            InstructionKind::Reset => Err(SimError::UnsupportedInstruction {
                name: instruction.name().to_string(),
                method: "statevector",
            }),
            InstructionKind::Measure | InstructionKind::Barrier | InstructionKind::Delay { .. } => {
                Ok(())
            }
        }
    }

    /// Apply `gate` with `qubits` in operand order.
    pub fn apply_gate(&mut self, gate: &StandardGate, qubits: &[usize]) -> SimResult<()> {
        match gate {
            StandardGate::I => {}
            StandardGate::X => self.apply_x(qubits[0]),
            StandardGate::Z => self.flip_sign(1 << qubits[0]),
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::CX => self.apply_cx(qubits[0], qubits[1]),
            StandardGate::CZ => self.flip_sign((1 << qubits[0]) | (1 << qubits[1])),
            _ => {
                let m = gate.matrix()?;
                self.apply_matrix(&m, qubits);
            }
        }
        Ok(())
    }

    /// Apply an arbitrary operator to `qubits` (first operand first).
    pub fn apply_matrix(&mut self, m: &GateMatrix, qubits: &[usize]) {
        let offsets = local_offsets(qubits);
        let mask = operand_mask(qubits);
        let mut scratch = vec![Complex64::new(0.0, 0.0); offsets.len()];
        for base in (0..self.amplitudes.len()).filter(|i| i & mask == 0) {
            apply_local(
                &mut self.amplitudes,
                m,
                &offsets,
                |off| base | off,
                &mut scratch,
                false,
            );
        }
    }

    /// Basis indices with every bit of `mask` cleared.
    fn lower_indices(&self, mask: usize) -> impl Iterator<Item = usize> + use<> {
        (0..self.amplitudes.len()).filter(move |i| i & mask == 0)
    }

    fn apply_x(&mut self, qubit: usize) {
        let bit = 1 << qubit;
        for i in self.lower_indices(bit) {
            self.amplitudes.swap(i, i | bit);
        }
    }

    /// Negate every amplitude whose index contains all of `mask`.
    fn flip_sign(&mut self, mask: usize) {
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask == mask {
                *amp = -*amp;
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let bit = 1 << qubit;
        for i in self.lower_indices(bit) {
            let (a, b) = (self.amplitudes[i], self.amplitudes[i | bit]);
            self.amplitudes[i] = (a + b) * FRAC_1_SQRT_2;
            self.amplitudes[i | bit] = (a - b) * FRAC_1_SQRT_2;
        }
    }

    fn apply_cx(&mut self, control: usize, target: usize) {
        let (c, t) = (1 << control, 1 << target);
        for i in self.lower_indices(c | t) {
            self.amplitudes.swap(i | c, i | c | t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdm_ir::{NoiseModel, ParameterExpression, QubitId};
    use std::f64::consts::PI;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert_eq!(sv.num_qubits(), 2);
        assert_eq!(sv.amplitudes().len(), 4);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(sv.amplitudes[1..].iter().all(|a| approx_eq(*a, Complex64::new(0.0, 0.0))));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2);
        sv.apply_h(0);
        sv.apply_cx(0, 1);

        let expected = [FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2];
        for (a, e) in sv.amplitudes.iter().zip(expected) {
            assert!(approx_eq(*a, Complex64::new(e, 0.0)));
        }
    }

    #[test]
    fn test_fast_path_matches_matrix() {
        for gate in [StandardGate::X, StandardGate::Z, StandardGate::H] {
            let mut fast = Statevector::new(2);
            fast.apply_gate(&StandardGate::Ry(ParameterExpression::constant(0.7)), &[1])
                .unwrap();
            let mut generic = fast.clone();
            fast.apply_gate(&gate, &[1]).unwrap();
            generic.apply_matrix(&gate.matrix().unwrap(), &[1]);
            for (a, b) in fast.amplitudes().iter().zip(generic.amplitudes()) {
                assert!(approx_eq(*a, *b), "{}", gate.name());
            }
        }
        for gate in [StandardGate::CX, StandardGate::CZ] {
            let mut fast = Statevector::new(3);
            fast.apply_h(2);
            fast.apply_h(0);
            let mut generic = fast.clone();
            fast.apply_gate(&gate, &[2, 0]).unwrap();
            generic.apply_matrix(&gate.matrix().unwrap(), &[2, 0]);
            for (a, b) in fast.amplitudes().iter().zip(generic.amplitudes()) {
                assert!(approx_eq(*a, *b), "{}", gate.name());
            }
        }
    }

    #[test]
    fn test_rotation_keeps_norm() {
        let mut sv = Statevector::new(2);
        sv.apply_gate(&StandardGate::Ry(ParameterExpression::constant(PI / 5.0)), &[1])
            .unwrap();
        sv.apply_gate(&StandardGate::Swap, &[0, 1]).unwrap();
        assert!((sv.norm_sqr() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_noise_is_rejected() {
        let mut sv = Statevector::new(1);
        let inst = Instruction::channel_noise(NoiseModel::BitFlip { p: 0.1 }, [QubitId(0)]);
        assert!(matches!(sv.apply(&inst), Err(SimError::NoiseRequiresDensityMatrix)));
        assert!(matches!(
            sv.apply(&Instruction::reset(QubitId(0))),
            Err(SimError::UnsupportedInstruction { .. })
        ));
    }
}
