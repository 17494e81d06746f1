//! Error types for the circuits crate.

use thiserror::Error;

/// Errors produced while building layered circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CircuitError {
    /// A sweep step of zero would never advance.
    #[error("{axis} step must be at least 1")]
    ZeroStep {
        /// Which sweep axis ("depth" or "num_qubits").
        axis: &'static str,
    },

    /// Circuits need at least one qubit.
    #[error("Circuit width must be at least 1 qubit")]
    ZeroWidth,

    /// The circuit passed in does not have the requested width.
    #[error("Circuit has {actual} qubits but the layer was built for {expected}")]
    WidthMismatch {
        /// Width the layer was requested for.
        expected: u32,
        /// Width of the circuit.
        actual: usize,
    },

    /// Unknown circuit family name.
    #[error("Unknown circuit choice '{0}'. Available: ry_cx, rxyz_cz, u_cx, ibm_native, clifford")]
    UnknownChoice(String),

    /// Unknown simulation method name.
    #[error("Unknown simulation method '{0}'. Available: density_matrix, statevector")]
    UnknownMethod(String),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qdm_ir::IrError),
}

/// Result type for circuit construction.
pub type CircuitResult<T> = Result<T, CircuitError>;
