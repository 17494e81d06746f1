//! Error types for the simulator backend.

use thiserror::Error;

/// Errors raised while configuring or running the simulator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Circuit exceeds the backend's qubit limit.
    #[error("Circuit has {qubits} qubits but backend '{backend}' only supports {max}")]
    CircuitTooLarge {
        /// Backend name.
        backend: String,
        /// Circuit width.
        qubits: usize,
        /// Configured limit.
        max: u32,
    },

    /// Configured qubit limit above what a dense density matrix can hold.
    #[error("max_qubits {requested} exceeds the supported limit of {max}")]
    QubitLimitTooLarge {
        /// Configured limit.
        requested: u32,
        /// Hard ceiling.
        max: u32,
    },

    /// Operation not in the backend's basis gate set.
    #[error("Operation '{gate}' is not in the basis gates of backend '{backend}'")]
    GateNotInBasis {
        /// Backend name.
        backend: String,
        /// Offending operation name.
        gate: String,
    },

    /// Noise was requested from the noiseless statevector method.
    #[error("Noise requires the density_matrix method")]
    NoiseRequiresDensityMatrix,

    /// Instruction the selected method cannot simulate.
    #[error("Instruction '{name}' is not supported by the {method} method")]
    UnsupportedInstruction {
        /// Instruction name.
        name: String,
        /// Simulation method name.
        method: &'static str,
    },

    /// A noise rate outside `[0, 1]`.
    #[error("Noise parameter '{field}' must be within [0, 1], got {value}")]
    InvalidNoiseRate {
        /// Configuration field name.
        field: &'static str,
        /// Supplied value.
        value: f64,
    },

    /// Raw state data has the wrong length.
    #[error("Expected {expected} elements for the state, got {got}")]
    DimensionMismatch {
        /// Required element count.
        expected: usize,
        /// Supplied element count.
        got: usize,
    },

    /// Statevector length is not a power of two.
    #[error("Statevector length {0} is not a power of two")]
    InvalidStatevector(usize),

    /// IR error (unbound parameter, bad noise channel, ...).
    #[error("IR error: {0}")]
    Ir(#[from] qdm_ir::IrError),
}

/// Result type for simulator operations.
pub type SimResult<T> = Result<T, SimError>;
