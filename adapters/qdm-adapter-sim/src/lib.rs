//! QDM Local Density-Matrix Simulator
//!
//! This crate runs `qdm-ir` circuits on a local simulator and returns the
//! final density matrix. Two methods are available:
//!
//! - **Density matrix**: full `2^n × 2^n` state with gate-attached noise
//!   ([`NoiseParams`]) and explicit noise channel instructions, applied
//!   through their Kraus operators.
//! - **Statevector**: noiseless pure-state reference, returned as `|ψ⟩⟨ψ|`.
//!
//! # Performance
//!
//! | Qubits | Density matrix memory |
//! |--------|-----------------------|
//! | 6 | ~64 KB |
//! | 8 | ~1 MB |
//! | 10 | ~16 MB |
//! | 12 | ~256 MB |
//!
//! # Example
//!
//! ```rust
//! use qdm_adapter_sim::{define_backend, BackendParams, NoiseParams};
//! use qdm_circuits::{define_gates, GateChoice, SimulationMethod};
//! use qdm_ir::Circuit;
//!
//! let basis = define_gates(GateChoice::Clifford, SimulationMethod::DensityMatrix);
//! let noise = NoiseParams::depolarizing(0.01);
//! let backend = define_backend(&BackendParams::default(), &noise, basis).unwrap();
//!
//! let mut circuit = Circuit::with_size("pair", 2, 0);
//! circuit.h(qdm_ir::QubitId(0)).unwrap();
//! circuit.cz(qdm_ir::QubitId(0), qdm_ir::QubitId(1)).unwrap();
//!
//! let rho = backend.run(&circuit).unwrap();
//! assert!((rho.trace().re - 1.0).abs() < 1e-10);
//! assert!(rho.purity().re < 1.0);
//! ```

mod backend;
mod density_matrix;
mod error;
mod kernel;
mod noise_params;
mod statevector;

pub use backend::{BackendParams, DEFAULT_MAX_QUBITS, MAX_SUPPORTED_QUBITS, SimulatorBackend, define_backend};
pub use density_matrix::{DensityMatrix, DensityMatrixEngine};
pub use error::{SimError, SimResult};
pub use noise_params::NoiseParams;
pub use statevector::Statevector;
