//! IR errors.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    #[error("{qubit} is outside the circuit{}", op_suffix(.gate_name.as_deref()))]
    QubitNotFound {
        qubit: QubitId,
        gate_name: Option<String>,
    },

    #[error("{clbit} is outside the circuit")]
    ClbitNotFound { clbit: ClbitId },

    #[error("'{gate_name}' acts on {expected} qubits but was given {got}")]
    QubitCountMismatch {
        gate_name: String,
        expected: u32,
        got: u32,
    },

    #[error("{qubit} appears twice{}", op_suffix(.gate_name.as_deref()))]
    DuplicateQubit {
        qubit: QubitId,
        gate_name: Option<String>,
    },

    #[error("Parameter '{0}' has no value")]
    UnboundParameter(String),

    /// Noise rate outside `[0, 1]`.
    #[error("{channel} rate {value} is not a probability")]
    InvalidNoiseParameter { channel: String, value: f64 },

    #[error("Cannot measure {qubits} qubits into {clbits} classical bits")]
    MeasureArity { qubits: usize, clbits: usize },
}

fn op_suffix(gate_name: Option<&str>) -> String {
    gate_name.map(|name| format!(" in '{name}'")).unwrap_or_default()
}

pub type IrResult<T> = Result<T, IrError>;
