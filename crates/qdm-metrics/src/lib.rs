//! QDM entanglement metrics.
//!
//! Computes, for every `(width, depth)` point of a sweep, three metrics of
//! the noisy output density matrix `ρ` of a layered circuit:
//!
//! - **vNd**: von Neumann entropy density `S(ρ)/n` (base 2)
//! - **pur**: purity `Re Tr(ρ²)`
//! - **R2d**: Rényi-2 entropy density `-log₂(pur)/n`
//!
//! # Example
//!
//! ```rust
//! use qdm_metrics::{get_metrics, ExperimentParams, PUR_SERIES};
//! use qdm_circuits::CircuitParams;
//!
//! let experiment = ExperimentParams {
//!     circuit_params: CircuitParams {
//!         depth_max: 3,
//!         num_qubits_max: 3,
//!         ..CircuitParams::default()
//!     },
//!     ..ExperimentParams::template()
//! };
//! let metrics = get_metrics(&experiment).unwrap();
//!
//! // widths 2 and 3, depths 1..=3
//! let purity = metrics.get(PUR_SERIES).unwrap();
//! assert_eq!(purity.len(), 2);
//! assert!(purity.iter().all(|row| row.len() == 3));
//! ```

pub mod entropy;
pub mod error;
pub mod export;
pub mod metrics;
pub mod params;
pub mod report;
pub mod sweep;

pub use entropy::{
    StateMetrics, purity, renyi2_density, renyi2_entropy, von_neumann_density, von_neumann_entropy,
};
pub use error::{MetricError, MetricResult};
pub use export::{ExportConfig, from_file, to_file, to_json};
pub use metrics::{Metrics, PUR_SERIES, R2D_SERIES, SWEEP_SERIES, VND_SERIES};
pub use params::{ConfigFormat, ExperimentParams};
pub use report::{SCHEMA_VERSION, SweepReport, WidthSweep};
pub use sweep::{
    experiment_backend, get_metrics, get_metrics_single_width, get_output_density_matrix,
    sweep_report, sweep_report_with,
};
