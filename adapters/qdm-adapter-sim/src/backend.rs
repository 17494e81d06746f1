//! Simulator backend: configuration, basis checks, and execution.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, instrument};

use qdm_circuits::{BasisGates, SimulationMethod};
use qdm_ir::{Circuit, InstructionKind};

use crate::density_matrix::{DensityMatrix, DensityMatrixEngine};
use crate::error::{SimError, SimResult};
use crate::noise_params::NoiseParams;
use crate::statevector::Statevector;

/// Default qubit limit. A density matrix on 10 qubits holds 2^20 amplitudes.
pub const DEFAULT_MAX_QUBITS: u32 = 10;

/// Hard ceiling on `max_qubits`: 14 qubits is a 4 GiB density matrix.
pub const MAX_SUPPORTED_QUBITS: u32 = 14;

/// Backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendParams {
    /// Backend name, used in logs and error messages.
    pub name: String,
    /// Largest circuit width accepted.
    pub max_qubits: u32,
    /// State representation.
    pub method: SimulationMethod,
}

impl Default for BackendParams {
    fn default() -> Self {
        Self {
            name: "simulator".into(),
            max_qubits: DEFAULT_MAX_QUBITS,
            method: SimulationMethod::DensityMatrix,
        }
    }
}

/// Local simulator backend returning the final density matrix of a circuit.
#[derive(Debug, Clone)]
pub struct SimulatorBackend {
    params: BackendParams,
    noise: NoiseParams,
    basis: BasisGates,
}

/// Build a backend from its configuration, noise model and basis gates.
pub fn define_backend(
    backend_params: &BackendParams,
    noise_params: &NoiseParams,
    basis_gates: BasisGates,
) -> SimResult<SimulatorBackend> {
    noise_params.validate()?;
    if backend_params.max_qubits > MAX_SUPPORTED_QUBITS {
        return Err(SimError::QubitLimitTooLarge {
            requested: backend_params.max_qubits,
            max: MAX_SUPPORTED_QUBITS,
        });
    }
    debug!(
        backend = %backend_params.name,
        method = %backend_params.method,
        max_qubits = backend_params.max_qubits,
        basis = ?basis_gates.gates(),
        "Defined backend"
    );
    Ok(SimulatorBackend {
        params: backend_params.clone(),
        noise: noise_params.clone(),
        basis: basis_gates,
    })
}

impl SimulatorBackend {
    /// Noiseless density-matrix backend accepting every standard gate.
    pub fn new() -> Self {
        Self {
            params: BackendParams::default(),
            noise: NoiseParams::noiseless(),
            basis: BasisGates::universal(),
        }
    }

    /// Backend name.
    pub fn name(&self) -> &str {
        &self.params.name
    }

    /// Current simulation method.
    pub fn method(&self) -> SimulationMethod {
        self.params.method
    }

    /// Switch the simulation method.
    pub fn set_method(&mut self, method: SimulationMethod) {
        self.params.method = method;
    }

    /// Largest circuit width accepted.
    pub fn max_qubits(&self) -> u32 {
        self.params.max_qubits
    }

    /// Noise model applied after every gate.
    pub fn noise(&self) -> &NoiseParams {
        &self.noise
    }

    /// Accepted operations.
    pub fn basis_gates(&self) -> &BasisGates {
        &self.basis
    }

    /// Simulate `circuit` from `|0…0⟩` and return the final state.
    ///
    /// The noise model adds its channels after every gate. The statevector
    /// method only runs noiseless circuits and returns `|ψ⟩⟨ψ|`.
    #[instrument(skip(self, circuit), fields(circuit = %circuit.name(), method = %self.params.method))]
    pub fn run(&self, circuit: &Circuit) -> SimResult<DensityMatrix> {
        let start = Instant::now();
        self.validate(circuit)?;

        let num_qubits = circuit.num_qubits();
        debug!(
            "Starting simulation: {} qubits, {} instructions",
            num_qubits,
            circuit.num_ops()
        );

        let state = match self.params.method {
            SimulationMethod::DensityMatrix => self.run_density_matrix(circuit)?,
            SimulationMethod::Statevector => {
                let mut sv = Statevector::new(num_qubits);
                for inst in circuit.instructions() {
                    sv.apply(inst)?;
                }
                sv.to_density_matrix()?
            }
        };

        debug!("Simulation completed in {:?}", start.elapsed());
        Ok(state)
    }

    fn run_density_matrix(&self, circuit: &Circuit) -> SimResult<DensityMatrix> {
        let mut engine = DensityMatrixEngine::new(circuit.num_qubits());
        for inst in circuit.instructions() {
            engine.apply(inst)?;
            if let InstructionKind::Gate { gate } = &inst.kind {
                for channel in self.noise.channels_for(gate, &inst.qubits) {
                    engine.apply(&channel)?;
                }
            }
        }
        Ok(engine.into_state())
    }

    fn validate(&self, circuit: &Circuit) -> SimResult<()> {
        if circuit.num_qubits() > self.params.max_qubits as usize {
            return Err(SimError::CircuitTooLarge {
                backend: self.params.name.clone(),
                qubits: circuit.num_qubits(),
                max: self.params.max_qubits,
            });
        }
        if self.params.method == SimulationMethod::Statevector && !self.noise.is_noiseless() {
            return Err(SimError::NoiseRequiresDensityMatrix);
        }
        for inst in circuit.instructions() {
            if !self.basis.contains(inst.name()) {
                return Err(SimError::GateNotInBasis {
                    backend: self.params.name.clone(),
                    gate: inst.name().to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdm_circuits::{GateChoice, define_gates};
    use qdm_ir::{NoiseModel, QubitId};

    #[test]
    fn test_default_backend() {
        let backend = SimulatorBackend::new();
        assert_eq!(backend.name(), "simulator");
        assert_eq!(backend.max_qubits(), DEFAULT_MAX_QUBITS);
        assert_eq!(backend.method(), SimulationMethod::DensityMatrix);
    }

    #[test]
    fn test_bell_state_is_pure() {
        let backend = SimulatorBackend::new();
        let rho = backend.run(&Circuit::bell().unwrap()).unwrap();
        assert!((rho.purity().re - 1.0).abs() < 1e-10);
        assert!((rho.get(0, 3).re - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_too_many_qubits() {
        let params = BackendParams {
            max_qubits: 3,
            ..BackendParams::default()
        };
        let backend =
            define_backend(&params, &NoiseParams::noiseless(), BasisGates::universal()).unwrap();
        let circuit = Circuit::with_size("wide", 5, 0);
        assert!(matches!(
            backend.run(&circuit),
            Err(SimError::CircuitTooLarge { qubits: 5, max: 3, .. })
        ));
    }

    #[test]
    fn test_unbounded_qubit_limit_rejected() {
        let params = BackendParams {
            max_qubits: 64,
            ..BackendParams::default()
        };
        assert!(matches!(
            define_backend(&params, &NoiseParams::noiseless(), BasisGates::universal()),
            Err(SimError::QubitLimitTooLarge { requested: 64, max: MAX_SUPPORTED_QUBITS })
        ));

        let at_ceiling = BackendParams {
            max_qubits: MAX_SUPPORTED_QUBITS,
            ..BackendParams::default()
        };
        let backend =
            define_backend(&at_ceiling, &NoiseParams::noiseless(), BasisGates::universal())
                .unwrap();
        assert!(matches!(
            backend.run(&Circuit::with_size("wide", 32, 0)),
            Err(SimError::CircuitTooLarge { qubits: 32, .. })
        ));
    }

    #[test]
    fn test_gate_outside_basis_rejected() {
        let basis = define_gates(GateChoice::RyCx, SimulationMethod::DensityMatrix);
        let backend =
            define_backend(&BackendParams::default(), &NoiseParams::noiseless(), basis).unwrap();
        let mut circuit = Circuit::with_size("cz", 2, 0);
        circuit.cz(QubitId(0), QubitId(1)).unwrap();
        assert!(matches!(
            backend.run(&circuit),
            Err(SimError::GateNotInBasis { gate, .. }) if gate == "cz"
        ));
    }

    #[test]
    fn test_noise_reduces_purity() {
        let backend = define_backend(
            &BackendParams::default(),
            &NoiseParams::depolarizing(0.05),
            BasisGates::universal(),
        )
        .unwrap();
        let rho = backend.run(&Circuit::ghz(3).unwrap()).unwrap();
        assert!((rho.trace().re - 1.0).abs() < 1e-10);
        assert!(rho.purity().re < 1.0 - 1e-3);
    }

    #[test]
    fn test_statevector_rejects_noise() {
        let mut backend = define_backend(
            &BackendParams::default(),
            &NoiseParams::depolarizing(0.01),
            BasisGates::universal(),
        )
        .unwrap();
        backend.set_method(SimulationMethod::Statevector);
        assert!(matches!(
            backend.run(&Circuit::bell().unwrap()),
            Err(SimError::NoiseRequiresDensityMatrix)
        ));

        let mut noiseless = SimulatorBackend::new();
        noiseless.set_method(SimulationMethod::Statevector);
        let mut circuit = Circuit::with_size("decay", 1, 0);
        circuit
            .noise(NoiseModel::AmplitudeDamping { gamma: 0.3 }, [QubitId(0)])
            .unwrap();
        assert!(matches!(
            noiseless.run(&circuit),
            Err(SimError::NoiseRequiresDensityMatrix)
        ));
    }

    #[test]
    fn test_methods_agree_without_noise() {
        let circuit = Circuit::ghz(3).unwrap();
        let mut backend = SimulatorBackend::new();
        let dm = backend.run(&circuit).unwrap();
        backend.set_method(SimulationMethod::Statevector);
        let sv = backend.run(&circuit).unwrap();
        for (a, b) in dm.as_slice().iter().zip(sv.as_slice()) {
            assert!((a - b).norm() < 1e-10);
        }
    }

    #[test]
    fn test_invalid_noise_rejected_at_definition() {
        let noise = NoiseParams {
            bit_flip: 2.0,
            ..NoiseParams::default()
        };
        assert!(matches!(
            define_backend(&BackendParams::default(), &noise, BasisGates::universal()),
            Err(SimError::InvalidNoiseRate { field: "bit_flip", .. })
        ));
    }

    #[test]
    fn test_backend_params_from_json() {
        let params: BackendParams =
            serde_json::from_str(r#"{"name": "dm", "method": "statevector"}"#).unwrap();
        assert_eq!(params.name, "dm");
        assert_eq!(params.max_qubits, DEFAULT_MAX_QUBITS);
        assert_eq!(params.method, SimulationMethod::Statevector);
    }
}
