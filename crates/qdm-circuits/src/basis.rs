//! Circuit families, simulation methods, and their basis gate sets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CircuitError;

/// Layered circuit family.
///
/// Every family alternates a block of single-qubit gates on each qubit with
/// an entangling block. The rotation angles (or Clifford picks) are drawn
/// from a generator seeded per layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateChoice {
    /// `Ry(θ)` on every qubit, then a linear CX ladder.
    #[default]
    RyCx,
    /// `Rx Ry Rz` on every qubit, then a CZ brickwork.
    RxyzCz,
    /// `U(θ, φ, λ)` on every qubit, then a CX brickwork.
    UCx,
    /// `Rz Sx Rz Sx Rz` on every qubit, then a CX brickwork.
    IbmNative,
    /// A random gate from `{H, S, Sdg, X, Y, Z}` on every qubit, then a CZ brickwork.
    Clifford,
}

impl GateChoice {
    /// All families, in display order.
    pub const ALL: [GateChoice; 5] = [
        GateChoice::RyCx,
        GateChoice::RxyzCz,
        GateChoice::UCx,
        GateChoice::IbmNative,
        GateChoice::Clifford,
    ];

    /// Configuration name of the family.
    pub fn name(self) -> &'static str {
        match self {
            GateChoice::RyCx => "ry_cx",
            GateChoice::RxyzCz => "rxyz_cz",
            GateChoice::UCx => "u_cx",
            GateChoice::IbmNative => "ibm_native",
            GateChoice::Clifford => "clifford",
        }
    }

    /// Gates emitted by circuits of this family, including the optional
    /// initial Hadamard column.
    fn gates(self) -> &'static [&'static str] {
        match self {
            GateChoice::RyCx => &["h", "ry", "cx"],
            GateChoice::RxyzCz => &["h", "rx", "ry", "rz", "cz"],
            GateChoice::UCx => &["h", "u", "cx"],
            GateChoice::IbmNative => &["rz", "sx", "cx"],
            GateChoice::Clifford => &["h", "s", "sdg", "x", "y", "z", "cz"],
        }
    }
}

impl fmt::Display for GateChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateChoice {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        GateChoice::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| CircuitError::UnknownChoice(s.to_string()))
    }
}

/// How the backend represents the quantum state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationMethod {
    /// Full density matrix; supports noise channels.
    #[default]
    DensityMatrix,
    /// Pure statevector; noiseless only.
    Statevector,
}

impl SimulationMethod {
    /// Configuration name of the method.
    pub fn name(self) -> &'static str {
        match self {
            SimulationMethod::DensityMatrix => "density_matrix",
            SimulationMethod::Statevector => "statevector",
        }
    }
}

impl fmt::Display for SimulationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimulationMethod {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "density_matrix" | "densmat" | "dm" => Ok(SimulationMethod::DensityMatrix),
            "statevector" | "sv" => Ok(SimulationMethod::Statevector),
            _ => Err(CircuitError::UnknownMethod(s.to_string())),
        }
    }
}

/// Basis gates (native gate set) accepted by a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasisGates {
    /// List of gate names in the basis.
    gates: Vec<String>,
}

impl BasisGates {
    /// Create a new basis gates set.
    pub fn new(gates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut set = Self { gates: vec![] };
        for gate in gates {
            set.insert(gate);
        }
        set
    }

    /// Add a gate name if it is not already present.
    pub fn insert(&mut self, gate: impl Into<String>) {
        let gate = gate.into();
        if !self.contains(&gate) {
            self.gates.push(gate);
        }
    }

    /// Check if a gate is in the basis.
    pub fn contains(&self, gate: &str) -> bool {
        self.gates.iter().any(|g| g == gate)
    }

    /// Get the basis gates.
    pub fn gates(&self) -> &[String] {
        &self.gates
    }

    /// A universal basis (all standard gates and non-unitary operations).
    pub fn universal() -> Self {
        Self::new([
            "id", "x", "y", "z", "h", "s", "sdg", "t", "tdg", "sx", "sxdg", "rx", "ry", "rz", "p",
            "u", "cx", "cy", "cz", "ch", "swap", "iswap", "crz", "cp", "rzz", "ccx", "cswap",
            "measure", "reset", "barrier", "delay", "noise",
        ])
    }
}

/// Basis gate set needed to run `choice` circuits with `method`.
///
/// Structural operations (`barrier`, `measure`) are always included. The
/// density-matrix method also admits explicit noise channel instructions.
pub fn define_gates(choice: GateChoice, method: SimulationMethod) -> BasisGates {
    let mut basis = BasisGates::new(choice.gates().iter().copied());
    basis.insert("barrier");
    basis.insert("measure");
    if method == SimulationMethod::DensityMatrix {
        basis.insert("noise");
    }
    basis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_roundtrip_names() {
        for choice in GateChoice::ALL {
            assert_eq!(choice.name().parse::<GateChoice>().unwrap(), choice);
        }
        assert_eq!("IBM-Native".parse::<GateChoice>().unwrap(), GateChoice::IbmNative);
        assert!("qaoa".parse::<GateChoice>().is_err());
    }

    #[test]
    fn test_method_aliases() {
        assert_eq!(
            "DensMat".parse::<SimulationMethod>().unwrap(),
            SimulationMethod::DensityMatrix
        );
        assert_eq!("sv".parse::<SimulationMethod>().unwrap(), SimulationMethod::Statevector);
    }

    #[test]
    fn test_define_gates_density_matrix() {
        let basis = define_gates(GateChoice::RyCx, SimulationMethod::DensityMatrix);
        assert!(basis.contains("ry"));
        assert!(basis.contains("cx"));
        assert!(basis.contains("noise"));
        assert!(basis.contains("h"));
        assert!(!basis.contains("cz"));
    }

    #[test]
    fn test_define_gates_statevector_excludes_noise() {
        let basis = define_gates(GateChoice::Clifford, SimulationMethod::Statevector);
        assert!(basis.contains("sdg"));
        assert!(!basis.contains("noise"));
    }

    #[test]
    fn test_ibm_native_basis_is_native_only() {
        let basis = define_gates(GateChoice::IbmNative, SimulationMethod::DensityMatrix);
        assert!(!basis.contains("h"));
        assert!(!basis.contains("x"));
        assert!(basis.contains("sx"));
    }

    #[test]
    fn test_basis_dedup() {
        let basis = BasisGates::new(["cx", "cx", "rz"]);
        assert_eq!(basis.gates().len(), 2);
    }
}
