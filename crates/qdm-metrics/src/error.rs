//! Metric and sweep error types.

use thiserror::Error;

/// Result type for metric operations.
pub type MetricResult<T> = Result<T, MetricError>;

/// Errors that can occur while computing metrics or running sweeps.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MetricError {
    /// Densities divide by the number of qubits.
    #[error("Metric densities need at least 1 qubit")]
    ZeroWidth,

    /// Logarithm base must be positive and different from 1.
    #[error("Invalid logarithm base {0}")]
    InvalidBase(f64),

    /// Series name not registered in the container.
    #[error("Unknown metric series '{0}'")]
    UnknownSeries(String),

    /// Experiment file extension not recognised.
    #[error("Unsupported experiment file format '{0}' (expected .yaml, .yml or .json)")]
    UnsupportedFormat(String),

    /// Experiment file parsing failed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization error.
    #[error("Export error: {0}")]
    Export(String),

    /// Circuit construction failed.
    #[error(transparent)]
    Circuit(#[from] qdm_circuits::CircuitError),

    /// Simulation failed.
    #[error(transparent)]
    Sim(#[from] qdm_adapter_sim::SimError),
}

impl From<serde_json::Error> for MetricError {
    fn from(e: serde_json::Error) -> Self {
        MetricError::Export(e.to_string())
    }
}

impl From<serde_yaml_ng::Error> for MetricError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        MetricError::Parse(e.to_string())
    }
}
