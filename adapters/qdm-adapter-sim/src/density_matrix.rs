//! Density-matrix state and simulation engine.

use nalgebra::DMatrix;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use qdm_ir::{GateMatrix, Instruction, InstructionKind, NoiseModel, StandardGate};

use crate::error::{SimError, SimResult};
use crate::kernel::{apply_local, local_offsets, operand_mask};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A mixed state on `n` qubits: a dense `2^n × 2^n` matrix in row-major
/// order. Qubit `q` is bit `q` of the basis index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityMatrix {
    num_qubits: usize,
    data: Vec<Complex64>,
}

impl DensityMatrix {
    /// `|0…0⟩⟨0…0|`.
    pub fn zero_state(num_qubits: usize) -> Self {
        let dim = 1usize << num_qubits;
        let mut data = vec![ZERO; dim * dim];
        data[0] = ONE;
        Self { num_qubits, data }
    }

    /// `I / 2^n`.
    pub fn maximally_mixed(num_qubits: usize) -> Self {
        let dim = 1usize << num_qubits;
        let mut data = vec![ZERO; dim * dim];
        let w = Complex64::new(1.0 / dim as f64, 0.0);
        for i in 0..dim {
            data[i * dim + i] = w;
        }
        Self { num_qubits, data }
    }

    /// `|ψ⟩⟨ψ|` for a statevector of length `2^n`.
    pub fn from_statevector(amplitudes: &[Complex64]) -> SimResult<Self> {
        let dim = amplitudes.len();
        if !dim.is_power_of_two() {
            return Err(SimError::InvalidStatevector(dim));
        }
        let mut data = Vec::with_capacity(dim * dim);
        for a in amplitudes {
            data.extend(amplitudes.iter().map(|b| a * b.conj()));
        }
        Ok(Self {
            num_qubits: dim.trailing_zeros() as usize,
            data,
        })
    }

    /// Wrap raw row-major data.
    pub fn from_row_major(num_qubits: usize, data: Vec<Complex64>) -> SimResult<Self> {
        let dim = 1usize << num_qubits;
        if data.len() != dim * dim {
            return Err(SimError::DimensionMismatch {
                expected: dim * dim,
                got: data.len(),
            });
        }
        Ok(Self { num_qubits, data })
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Matrix dimension `2^n`.
    #[inline]
    pub fn dim(&self) -> usize {
        1 << self.num_qubits
    }

    /// Element `ρ[row, col]`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * self.dim() + col]
    }

    /// Row-major elements.
    pub fn as_slice(&self) -> &[Complex64] {
        &self.data
    }

    /// `Tr(ρ)`.
    pub fn trace(&self) -> Complex64 {
        let dim = self.dim();
        (0..dim).map(|i| self.data[i * dim + i]).sum()
    }

    /// `Tr(ρ²)`, complex as computed. The imaginary part is rounding noise
    /// for a Hermitian `ρ`.
    pub fn purity(&self) -> Complex64 {
        let dim = self.dim();
        let mut acc = ZERO;
        for r in 0..dim {
            for c in 0..dim {
                acc += self.data[r * dim + c] * self.data[c * dim + r];
            }
        }
        acc
    }

    /// Diagonal of `ρ`: computational basis probabilities.
    pub fn probabilities(&self) -> Vec<f64> {
        let dim = self.dim();
        (0..dim).map(|i| self.data[i * dim + i].re).collect()
    }

    /// Eigenvalues of the Hermitian part `(ρ + ρ†)/2`, in descending order.
    pub fn eigenvalues(&self) -> Vec<f64> {
        let dim = self.dim();
        let rho = DMatrix::from_row_slice(dim, dim, &self.data);
        let hermitian = (&rho + rho.adjoint()) * Complex64::new(0.5, 0.0);
        let mut values: Vec<f64> = hermitian.symmetric_eigenvalues().iter().copied().collect();
        values.sort_by(|a, b| b.total_cmp(a));
        values
    }

    /// Check `ρ = ρ†` element-wise within `tol`.
    pub fn is_hermitian(&self, tol: f64) -> bool {
        let dim = self.dim();
        (0..dim).all(|r| (r..dim).all(|c| (self.get(r, c) - self.get(c, r).conj()).norm() <= tol))
    }
}

/// Evolves a [`DensityMatrix`] through circuit instructions.
///
/// Gates act as `ρ → UρU†`, noise channels as `ρ → Σ_i K_i ρ K_i†`.
/// Measurement, barriers and delays leave `ρ` unchanged.
#[derive(Debug, Clone)]
pub struct DensityMatrixEngine {
    state: DensityMatrix,
}

impl DensityMatrixEngine {
    /// Start from `|0…0⟩⟨0…0|`.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            state: DensityMatrix::zero_state(num_qubits),
        }
    }

    /// Start from an arbitrary state.
    pub fn from_state(state: DensityMatrix) -> Self {
        Self { state }
    }

    /// Current state.
    pub fn state(&self) -> &DensityMatrix {
        &self.state
    }

    /// Consume the engine, returning the final state.
    pub fn into_state(self) -> DensityMatrix {
        self.state
    }

    /// Apply one circuit instruction.
    pub fn apply(&mut self, instruction: &Instruction) -> SimResult<()> {
        let qubits: Vec<usize> = instruction.qubits.iter().map(|q| q.index()).collect();
        match &instruction.kind {
            InstructionKind::Gate { gate } => self.apply_gate(gate, &qubits),
            InstructionKind::NoiseChannel { model, .. } => self.apply_noise(model, &qubits),
            InstructionKind::Reset => {
                for &q in &qubits {
                    self.reset(q);
                }
                Ok(())
            }
            InstructionKind::Measure | InstructionKind::Barrier | InstructionKind::Delay { .. } => {
                Ok(())
            }
        }
    }

    /// Apply a standard gate to `qubits` (first operand first).
    pub fn apply_gate(&mut self, gate: &StandardGate, qubits: &[usize]) -> SimResult<()> {
        let m = gate.matrix()?;
        self.apply_unitary(&m, qubits);
        Ok(())
    }

    /// Apply a noise channel through its Kraus operators.
    pub fn apply_noise(&mut self, model: &NoiseModel, qubits: &[usize]) -> SimResult<()> {
        if model.is_identity() {
            return Ok(());
        }
        let ops = model.kraus_operators(qubits.len() as u32)?;
        self.apply_kraus(&ops, qubits);
        Ok(())
    }

    /// `ρ → UρU†`.
    pub fn apply_unitary(&mut self, m: &GateMatrix, qubits: &[usize]) {
        conjugate_by(&mut self.state.data, self.state.num_qubits, m, qubits);
    }

    /// `ρ → Σ_i K_i ρ K_i†`. An empty operator set leaves `ρ` unchanged.
    pub fn apply_kraus(&mut self, ops: &[GateMatrix], qubits: &[usize]) {
        let Some((last, rest)) = ops.split_last() else {
            return;
        };
        let n = self.state.num_qubits;
        let mut acc = vec![ZERO; self.state.data.len()];
        for k in rest {
            let mut branch = self.state.data.clone();
            conjugate_by(&mut branch, n, k, qubits);
            for (a, b) in acc.iter_mut().zip(&branch) {
                *a += b;
            }
        }
        conjugate_by(&mut self.state.data, n, last, qubits);
        for (a, b) in acc.iter().zip(self.state.data.iter_mut()) {
            *b += a;
        }
    }

    /// Reset `qubit` to `|0⟩`: Kraus operators `|0⟩⟨0|` and `|0⟩⟨1|`.
    pub fn reset(&mut self, qubit: usize) {
        let project = GateMatrix::single([ONE, ZERO, ZERO, ZERO]);
        let lower = GateMatrix::single([ZERO, ONE, ZERO, ZERO]);
        self.apply_kraus(&[project, lower], &[qubit]);
    }
}

/// In-place `ρ → MρM†` on row-major data.
fn conjugate_by(data: &mut [Complex64], num_qubits: usize, m: &GateMatrix, qubits: &[usize]) {
    let dim = 1usize << num_qubits;
    let offsets = local_offsets(qubits);
    let mask = operand_mask(qubits);
    let mut scratch = vec![ZERO; offsets.len()];
    let bases: Vec<usize> = (0..dim).filter(|i| i & mask == 0).collect();

    // M·ρ: mix rows within every column.
    for col in 0..dim {
        for &base in &bases {
            apply_local(data, m, &offsets, |off| (base | off) * dim + col, &mut scratch, false);
        }
    }
    // (M·ρ)·M†: mix columns within every row.
    for row in 0..dim {
        for &base in &bases {
            apply_local(data, m, &offsets, |off| row * dim + (base | off), &mut scratch, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdm_ir::ParameterExpression;
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    fn close(a: Complex64, b: f64) -> bool {
        (a - Complex64::new(b, 0.0)).norm() < 1e-10
    }

    #[test]
    fn test_zero_state() {
        let rho = DensityMatrix::zero_state(2);
        assert_eq!(rho.dim(), 4);
        assert!(close(rho.trace(), 1.0));
        assert!(close(rho.purity(), 1.0));
        assert_eq!(rho.probabilities(), vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_maximally_mixed_purity() {
        let rho = DensityMatrix::maximally_mixed(3);
        assert!(close(rho.trace(), 1.0));
        assert!(close(rho.purity(), 1.0 / 8.0));
    }

    #[test]
    fn test_from_statevector() {
        let s = Complex64::new(FRAC_1_SQRT_2, 0.0);
        let rho = DensityMatrix::from_statevector(&[s, ZERO, ZERO, s]).unwrap();
        assert_eq!(rho.num_qubits(), 2);
        assert!(close(rho.get(0, 3), 0.5));
        assert!(close(rho.get(3, 0), 0.5));
        assert!(matches!(
            DensityMatrix::from_statevector(&[ONE, ZERO, ZERO]),
            Err(SimError::InvalidStatevector(3))
        ));
    }

    #[test]
    fn test_from_row_major_checks_length() {
        let err = DensityMatrix::from_row_major(1, vec![ONE; 3]).unwrap_err();
        assert!(matches!(err, SimError::DimensionMismatch { expected: 4, got: 3 }));
    }

    #[test]
    fn test_bell_state() {
        let mut engine = DensityMatrixEngine::new(2);
        engine.apply_gate(&StandardGate::H, &[0]).unwrap();
        engine.apply_gate(&StandardGate::CX, &[0, 1]).unwrap();
        let rho = engine.into_state();
        // |00⟩ and |11⟩ are indices 0 and 3
        assert!(close(rho.get(0, 0), 0.5));
        assert!(close(rho.get(3, 3), 0.5));
        assert!(close(rho.get(0, 3), 0.5));
        assert!(close(rho.get(1, 1), 0.0));
        assert!(close(rho.purity(), 1.0));
    }

    #[test]
    fn test_cx_control_is_first_operand() {
        let mut engine = DensityMatrixEngine::new(2);
        engine.apply_gate(&StandardGate::X, &[1]).unwrap();
        engine.apply_gate(&StandardGate::CX, &[1, 0]).unwrap();
        // qubits 0 and 1 set: index 3
        assert!(close(engine.state().get(3, 3), 1.0));
    }

    #[test]
    fn test_eigenvalues_sorted() {
        let mut engine = DensityMatrixEngine::new(1);
        engine.apply_gate(&StandardGate::H, &[0]).unwrap();
        engine
            .apply_noise(&NoiseModel::PhaseFlip { p: 0.5 }, &[0])
            .unwrap();
        let eig = engine.state().eigenvalues();
        assert!((eig[0] - 0.5).abs() < 1e-10);
        assert!((eig[1] - 0.5).abs() < 1e-10);

        let pure = DensityMatrix::zero_state(2).eigenvalues();
        assert!((pure[0] - 1.0).abs() < 1e-10);
        assert!(pure[1..].iter().all(|v| v.abs() < 1e-10));
    }

    #[test]
    fn test_amplitude_damping_full_decay() {
        let mut engine = DensityMatrixEngine::new(1);
        engine.apply_gate(&StandardGate::X, &[0]).unwrap();
        engine
            .apply_noise(&NoiseModel::AmplitudeDamping { gamma: 1.0 }, &[0])
            .unwrap();
        assert!(close(engine.state().get(0, 0), 1.0));
    }

    #[test]
    fn test_full_depolarizing_is_maximally_mixed() {
        let mut engine = DensityMatrixEngine::new(2);
        engine.apply_gate(&StandardGate::H, &[0]).unwrap();
        engine.apply_gate(&StandardGate::CX, &[0, 1]).unwrap();
        engine
            .apply_noise(&NoiseModel::Depolarizing { p: 1.0 }, &[0, 1])
            .unwrap();
        let mixed = DensityMatrix::maximally_mixed(2);
        for r in 0..4 {
            for c in 0..4 {
                assert!((engine.state().get(r, c) - mixed.get(r, c)).norm() < 1e-10);
            }
        }
    }

    #[test]
    fn test_reset_traces_out_qubit() {
        let mut engine = DensityMatrixEngine::new(2);
        engine.apply_gate(&StandardGate::H, &[0]).unwrap();
        engine.apply_gate(&StandardGate::CX, &[0, 1]).unwrap();
        engine.reset(0);
        let rho = engine.state();
        assert!(close(rho.trace(), 1.0));
        // qubit 1 stays mixed: |00⟩ and |10⟩ (index 2) at 1/2 each
        assert!(close(rho.get(0, 0), 0.5));
        assert!(close(rho.get(2, 2), 0.5));
        assert!(close(rho.get(0, 2), 0.0));
    }

    #[test]
    fn test_symbolic_gate_is_rejected() {
        let mut engine = DensityMatrixEngine::new(1);
        let gate = StandardGate::Rx(ParameterExpression::symbol("theta"));
        assert!(matches!(engine.apply_gate(&gate, &[0]), Err(SimError::Ir(_))));
    }

    #[test]
    fn test_rotation_preserves_hermiticity() {
        let mut engine = DensityMatrixEngine::new(3);
        engine
            .apply_gate(&StandardGate::Ry(ParameterExpression::constant(PI / 3.0)), &[1])
            .unwrap();
        engine.apply_gate(&StandardGate::CCX, &[1, 2, 0]).unwrap();
        assert!(engine.state().is_hermitian(1e-12));
        assert!(close(engine.state().trace(), 1.0));
    }
}
