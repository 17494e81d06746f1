//! Depth and width sweeps.
//!
//! A width sweep builds the circuit once at `depth_min` and grows it by
//! `depth_step` layers between depth points, so every depth point reuses
//! the layers of the previous one.

use tracing::{debug, info, instrument};

use qdm_adapter_sim::{DensityMatrix, SimulatorBackend, define_backend};
use qdm_circuits::{CircuitParams, SimulationMethod, add_circuit_layer, define_gates, init_circuit};
use qdm_ir::Circuit;

use crate::entropy::StateMetrics;
use crate::error::{MetricError, MetricResult};
use crate::metrics::Metrics;
use crate::params::ExperimentParams;
use crate::report::{SweepReport, WidthSweep};

/// Final density matrix of `circuit` under the backend's noise model.
///
/// The backend only borrows `circuit`, so the sweep keeps appending layers
/// to the same circuit between runs.
pub fn get_output_density_matrix(
    circuit: &Circuit,
    backend: &SimulatorBackend,
) -> MetricResult<DensityMatrix> {
    Ok(backend.run(circuit)?)
}

/// Sweep depth at a single width.
///
/// Returns one value per depth point in each of the three series.
///
/// Layer indices are contiguous from the start of the circuit: the point at
/// depth `d` is always built from layers `0..d`, whatever `depth_step` is.
/// A stepped sweep therefore reports the same values as a unit-step sweep
/// at the depths they share.
#[instrument(skip(backend, circuit_params), fields(choice = %circuit_params.choice))]
pub fn get_metrics_single_width(
    backend: &SimulatorBackend,
    circuit_params: &CircuitParams,
    num_qubits: u32,
) -> MetricResult<WidthSweep> {
    if num_qubits == 0 {
        return Err(MetricError::ZeroWidth);
    }
    let depths = circuit_params.depths()?;
    let mut sweep = WidthSweep::new(num_qubits);
    if depths.is_empty() {
        return Ok(sweep);
    }

    let mut circuit = init_circuit(circuit_params, num_qubits)?;
    let mut layers = circuit_params.depth_min;
    for depth in depths {
        while layers < depth {
            add_circuit_layer(circuit_params, num_qubits, &mut circuit, layers)?;
            layers += 1;
        }
        let rho = get_output_density_matrix(&circuit, backend)?;
        let metrics = StateMetrics::of(&rho)?;
        debug!(
            depth,
            vnd = metrics.vnd,
            pur = metrics.pur,
            r2d = metrics.r2d,
            "depth point"
        );
        sweep.push(depth, metrics);
    }
    Ok(sweep)
}

/// Density-matrix backend for `experiment`, restricted to the gates its
/// circuit family emits.
pub fn experiment_backend(experiment: &ExperimentParams) -> MetricResult<SimulatorBackend> {
    let basis = define_gates(
        experiment.circuit_params.choice,
        SimulationMethod::DensityMatrix,
    );
    let mut backend = define_backend(
        &experiment.backend_params,
        &experiment.noise_params,
        basis,
    )?;
    backend.set_method(SimulationMethod::DensityMatrix);
    Ok(backend)
}

/// Sweep every width of `experiment`, calling `on_width` after each one.
pub fn sweep_report_with(
    experiment: &ExperimentParams,
    mut on_width: impl FnMut(&WidthSweep),
) -> MetricResult<SweepReport> {
    experiment.validate()?;
    let params = &experiment.circuit_params;
    let backend = experiment_backend(experiment)?;

    let widths = params.widths()?;
    info!(
        choice = %params.choice,
        widths = widths.len(),
        backend = backend.name(),
        "Starting sweep"
    );

    let mut report = SweepReport::new(experiment.clone(), params.depths()?, widths.clone());
    for num_qubits in widths {
        let sweep = get_metrics_single_width(&backend, params, num_qubits)?;
        on_width(&sweep);
        report.sweeps.push(sweep);
    }
    Ok(report)
}

/// Sweep every width of `experiment` into a [`SweepReport`].
pub fn sweep_report(experiment: &ExperimentParams) -> MetricResult<SweepReport> {
    sweep_report_with(experiment, |_| {})
}

/// Sweep every width of `experiment` into the three metric series, one row
/// per width.
pub fn get_metrics(experiment: &ExperimentParams) -> MetricResult<Metrics> {
    sweep_report(experiment)?.metrics()
}
