//! Shared helpers for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use tracing::debug;

use qdm_metrics::{ExperimentParams, WidthSweep};

/// Load and validate an experiment file (YAML or JSON).
pub fn load_experiment(path: &str) -> Result<ExperimentParams> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    let experiment = ExperimentParams::from_file(path)
        .with_context(|| format!("Failed to load experiment: {path}"))?;
    debug!(path, choice = %experiment.circuit_params.choice, "Loaded experiment");
    Ok(experiment)
}

/// Print the depth table of one width sweep.
pub fn print_width_sweep(sweep: &WidthSweep) {
    println!(
        "{} {}",
        style("Width").bold(),
        style(format!("{} qubits", sweep.num_qubits)).cyan()
    );
    if sweep.is_empty() {
        println!("  {}", style("(no depth points)").dim());
        return;
    }
    println!(
        "  {:>6}  {:>10}  {:>10}  {:>10}",
        style("depth").dim(),
        style("vNd").dim(),
        style("pur").dim(),
        style("R2d").dim()
    );
    for (depth, m) in sweep.points() {
        println!(
            "  {:>6}  {:>10.6}  {:>10.6}  {:>10.6}",
            depth, m.vnd, m.pur, m.r2d
        );
    }
}

/// One-line summary of an experiment.
pub fn describe_experiment(experiment: &ExperimentParams) -> String {
    let c = &experiment.circuit_params;
    format!(
        "{} | depth {}..={} step {} | width {}..={} step {} | seed {}",
        c.choice,
        c.depth_min,
        c.depth_max,
        c.depth_step,
        c.num_qubits_min,
        c.num_qubits_max,
        c.num_qubits_step,
        c.seed
    )
}
