//! Standard gates and dense operator matrices.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, PI};

use crate::error::{IrError, IrResult};
use crate::parameter::ParameterExpression;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Gates with a fixed matrix, possibly parameterized by angles.
///
/// Operand order follows the instruction: controls first, then targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gate", content = "params", rename_all = "lowercase")]
pub enum StandardGate {
    #[serde(rename = "id")]
    I,
    X,
    Y,
    Z,
    H,
    /// `√Z`
    S,
    Sdg,
    /// `⁴√Z`
    T,
    Tdg,
    /// `√X`
    SX,
    SXdg,
    Rx(ParameterExpression),
    Ry(ParameterExpression),
    Rz(ParameterExpression),
    /// `diag(1, e^{iθ})`
    P(ParameterExpression),
    /// `U(θ, φ, λ) = Rz(φ)·Ry(θ)·Rz(λ)` up to global phase.
    U(
        ParameterExpression,
        ParameterExpression,
        ParameterExpression,
    ),
    CX,
    CY,
    CZ,
    CH,
    Swap,
    ISwap,
    CRz(ParameterExpression),
    CP(ParameterExpression),
    /// `exp(-iθ Z⊗Z / 2)`
    RZZ(ParameterExpression),
    /// Toffoli.
    CCX,
    /// Fredkin.
    CSwap,
}

impl StandardGate {
    /// Lowercase OpenQASM name.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::SXdg => "sxdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::U(_, _, _) => "u",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::CH => "ch",
            StandardGate::Swap => "swap",
            StandardGate::ISwap => "iswap",
            StandardGate::CRz(_) => "crz",
            StandardGate::CP(_) => "cp",
            StandardGate::RZZ(_) => "rzz",
            StandardGate::CCX => "ccx",
            StandardGate::CSwap => "cswap",
        }
    }

    /// Operand count.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        use StandardGate::*;
        match self {
            CCX | CSwap => 3,
            CX | CY | CZ | CH | Swap | ISwap | CRz(_) | CP(_) | RZZ(_) => 2,
            _ => 1,
        }
    }

    /// Angles in declaration order.
    pub fn parameters(&self) -> Vec<&ParameterExpression> {
        use StandardGate::*;
        match self {
            Rx(p) | Ry(p) | Rz(p) | P(p) | CRz(p) | CP(p) | RZZ(p) => vec![p],
            U(theta, phi, lambda) => vec![theta, phi, lambda],
            _ => Vec::new(),
        }
    }

    /// Whether any angle is still symbolic.
    pub fn is_parameterized(&self) -> bool {
        self.parameters().iter().any(|p| p.is_symbolic())
    }

    /// Build the unitary matrix of this gate.
    ///
    /// Fails with [`IrError::UnboundParameter`] while any angle is symbolic.
    pub fn matrix(&self) -> IrResult<GateMatrix> {
        let m = match self {
            StandardGate::I => GateMatrix::single([ONE, ZERO, ZERO, ONE]),
            StandardGate::X => pauli_x(),
            StandardGate::Y => pauli_y(),
            StandardGate::Z => pauli_z(),
            StandardGate::H => hadamard(),
            StandardGate::S => phase(PI / 2.0),
            StandardGate::Sdg => phase(-PI / 2.0),
            StandardGate::T => phase(PI / 4.0),
            StandardGate::Tdg => phase(-PI / 4.0),
            StandardGate::SX => {
                let (a, b) = (Complex64::new(0.5, 0.5), Complex64::new(0.5, -0.5));
                GateMatrix::single([a, b, b, a])
            }
            StandardGate::SXdg => {
                let (a, b) = (Complex64::new(0.5, -0.5), Complex64::new(0.5, 0.5));
                GateMatrix::single([a, b, b, a])
            }
            StandardGate::Rx(theta) => rx(bound(theta)?),
            StandardGate::Ry(theta) => ry(bound(theta)?),
            StandardGate::Rz(theta) => rz(bound(theta)?),
            StandardGate::P(theta) => phase(bound(theta)?),
            StandardGate::U(theta, phi, lambda) => {
                u(bound(theta)?, bound(phi)?, bound(lambda)?)
            }
            StandardGate::CX => pauli_x().controlled(),
            StandardGate::CY => pauli_y().controlled(),
            StandardGate::CZ => pauli_z().controlled(),
            StandardGate::CH => hadamard().controlled(),
            StandardGate::Swap => swap(),
            StandardGate::ISwap => GateMatrix {
                num_qubits: 2,
                data: vec![
                    ONE, ZERO, ZERO, ZERO, //
                    ZERO, ZERO, I, ZERO, //
                    ZERO, I, ZERO, ZERO, //
                    ZERO, ZERO, ZERO, ONE,
                ],
            },
            StandardGate::CRz(theta) => rz(bound(theta)?).controlled(),
            StandardGate::CP(theta) => phase(bound(theta)?).controlled(),
            StandardGate::RZZ(theta) => {
                let t = bound(theta)?;
                let even = Complex64::from_polar(1.0, -t / 2.0);
                let odd = Complex64::from_polar(1.0, t / 2.0);
                GateMatrix::diagonal(2, &[even, odd, odd, even])
            }
            StandardGate::CCX => pauli_x().controlled().controlled(),
            StandardGate::CSwap => swap().controlled(),
        };
        Ok(m)
    }
}

fn bound(param: &ParameterExpression) -> IrResult<f64> {
    param.as_f64().ok_or_else(|| {
        IrError::UnboundParameter(param.first_symbol().unwrap_or_default().to_string())
    })
}

fn pauli_x() -> GateMatrix {
    GateMatrix::single([ZERO, ONE, ONE, ZERO])
}

fn pauli_y() -> GateMatrix {
    GateMatrix::single([ZERO, -I, I, ZERO])
}

fn pauli_z() -> GateMatrix {
    GateMatrix::single([ONE, ZERO, ZERO, -ONE])
}

fn hadamard() -> GateMatrix {
    let s = Complex64::new(FRAC_1_SQRT_2, 0.0);
    GateMatrix::single([s, s, s, -s])
}

fn phase(lambda: f64) -> GateMatrix {
    GateMatrix::single([ONE, ZERO, ZERO, Complex64::from_polar(1.0, lambda)])
}

fn rx(theta: f64) -> GateMatrix {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new(0.0, -(theta / 2.0).sin());
    GateMatrix::single([c, s, s, c])
}

fn ry(theta: f64) -> GateMatrix {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new((theta / 2.0).sin(), 0.0);
    GateMatrix::single([c, -s, s, c])
}

fn rz(theta: f64) -> GateMatrix {
    GateMatrix::single([
        Complex64::from_polar(1.0, -theta / 2.0),
        ZERO,
        ZERO,
        Complex64::from_polar(1.0, theta / 2.0),
    ])
}

fn u(theta: f64, phi: f64, lambda: f64) -> GateMatrix {
    let c = (theta / 2.0).cos();
    let s = (theta / 2.0).sin();
    GateMatrix::single([
        Complex64::new(c, 0.0),
        -Complex64::from_polar(s, lambda),
        Complex64::from_polar(s, phi),
        Complex64::from_polar(c, phi + lambda),
    ])
}

fn swap() -> GateMatrix {
    GateMatrix {
        num_qubits: 2,
        data: vec![
            ONE, ZERO, ZERO, ZERO, //
            ZERO, ZERO, ONE, ZERO, //
            ZERO, ONE, ZERO, ZERO, //
            ZERO, ZERO, ZERO, ONE,
        ],
    }
}

/// A dense operator on `num_qubits` qubits, row-major `2^k × 2^k`.
///
/// Local basis indices put the first operand in the most significant bit:
/// for `CX(control, target)` the row index is `2·control + target`.
#[derive(Debug, Clone, PartialEq)]
pub struct GateMatrix {
    /// Number of qubits the operator acts on.
    pub num_qubits: u32,
    /// Matrix elements in row-major order.
    pub data: Vec<Complex64>,
}

impl GateMatrix {
    /// A single-qubit operator `[[a, b], [c, d]]`.
    pub fn single(data: [Complex64; 4]) -> Self {
        Self {
            num_qubits: 1,
            data: data.to_vec(),
        }
    }

    /// A diagonal operator.
    pub fn diagonal(num_qubits: u32, diag: &[Complex64]) -> Self {
        let dim = 1usize << num_qubits;
        debug_assert_eq!(diag.len(), dim);
        let mut data = vec![ZERO; dim * dim];
        for (i, d) in diag.iter().enumerate() {
            data[i * dim + i] = *d;
        }
        Self { num_qubits, data }
    }

    /// Dimension `2^k` of the operator.
    #[inline]
    pub fn dim(&self) -> usize {
        1 << self.num_qubits
    }

    /// Element at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * self.dim() + col]
    }

    /// Add a control qubit in front of the existing operands.
    #[must_use]
    pub fn controlled(&self) -> Self {
        let inner = self.dim();
        let dim = inner * 2;
        let mut data = vec![ZERO; dim * dim];
        for i in 0..inner {
            data[i * dim + i] = ONE;
        }
        for r in 0..inner {
            for c in 0..inner {
                data[(inner + r) * dim + inner + c] = self.get(r, c);
            }
        }
        Self {
            num_qubits: self.num_qubits + 1,
            data,
        }
    }

    /// Conjugate transpose.
    #[must_use]
    pub fn dagger(&self) -> Self {
        let dim = self.dim();
        let mut data = vec![ZERO; dim * dim];
        for r in 0..dim {
            for c in 0..dim {
                data[c * dim + r] = self.get(r, c).conj();
            }
        }
        Self {
            num_qubits: self.num_qubits,
            data,
        }
    }

    /// Kronecker product `self ⊗ other`; `self` acts on the leading operands.
    #[must_use]
    pub fn kron(&self, other: &Self) -> Self {
        let (da, db) = (self.dim(), other.dim());
        let dim = da * db;
        let mut data = vec![ZERO; dim * dim];
        for ra in 0..da {
            for ca in 0..da {
                let a = self.get(ra, ca);
                if a == ZERO {
                    continue;
                }
                for rb in 0..db {
                    for cb in 0..db {
                        data[(ra * db + rb) * dim + ca * db + cb] = a * other.get(rb, cb);
                    }
                }
            }
        }
        Self {
            num_qubits: self.num_qubits + other.num_qubits,
            data,
        }
    }

    /// Multiply every element by a real factor.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            num_qubits: self.num_qubits,
            data: self.data.iter().map(|v| *v * factor).collect(),
        }
    }

    /// Check `M·M† = I` within `tol`.
    pub fn is_unitary(&self, tol: f64) -> bool {
        let dim = self.dim();
        (0..dim).all(|r| {
            (0..dim).all(|c| {
                let dot: Complex64 = (0..dim).map(|k| self.get(r, k) * self.get(c, k).conj()).sum();
                let expected = if r == c { ONE } else { ZERO };
                (dot - expected).norm() < tol
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::CCX.num_qubits(), 3);

        assert!(!StandardGate::H.is_parameterized());
        assert!(!StandardGate::Rx(ParameterExpression::constant(PI)).is_parameterized());
        assert!(StandardGate::Rx(ParameterExpression::symbol("theta")).is_parameterized());
    }

    #[test]
    fn test_all_matrices_unitary() {
        let a = ParameterExpression::constant(0.37);
        let gates = [
            StandardGate::I,
            StandardGate::X,
            StandardGate::Y,
            StandardGate::Z,
            StandardGate::H,
            StandardGate::S,
            StandardGate::Sdg,
            StandardGate::T,
            StandardGate::Tdg,
            StandardGate::SX,
            StandardGate::SXdg,
            StandardGate::Rx(a.clone()),
            StandardGate::Ry(a.clone()),
            StandardGate::Rz(a.clone()),
            StandardGate::P(a.clone()),
            StandardGate::U(a.clone(), a.clone(), a.clone()),
            StandardGate::CX,
            StandardGate::CY,
            StandardGate::CZ,
            StandardGate::CH,
            StandardGate::Swap,
            StandardGate::ISwap,
            StandardGate::CRz(a.clone()),
            StandardGate::CP(a.clone()),
            StandardGate::RZZ(a),
            StandardGate::CCX,
            StandardGate::CSwap,
        ];
        for gate in gates {
            let m = gate.matrix().unwrap();
            assert_eq!(m.num_qubits, gate.num_qubits(), "{}", gate.name());
            assert!(m.is_unitary(1e-12), "{} is not unitary", gate.name());
        }
    }

    #[test]
    fn test_cx_layout() {
        let m = StandardGate::CX.matrix().unwrap();
        // |10⟩ (control set) maps to |11⟩
        assert_eq!(m.get(3, 2), ONE);
        assert_eq!(m.get(2, 2), ZERO);
        assert_eq!(m.get(1, 1), ONE);
    }

    #[test]
    fn test_sx_squared_is_x() {
        let sx = StandardGate::SX.matrix().unwrap();
        let x = StandardGate::X.matrix().unwrap();
        for r in 0..2 {
            for c in 0..2 {
                let v: Complex64 = (0..2).map(|k| sx.get(r, k) * sx.get(k, c)).sum();
                assert!((v - x.get(r, c)).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn test_unbound_matrix_fails() {
        let gate = StandardGate::Ry(ParameterExpression::symbol("phi"));
        assert!(matches!(
            gate.matrix(),
            Err(IrError::UnboundParameter(name)) if name == "phi"
        ));
    }
}
