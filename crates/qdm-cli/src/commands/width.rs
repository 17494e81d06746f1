//! Width command implementation.

use anyhow::Result;
use console::style;

use qdm_metrics::{experiment_backend, get_metrics_single_width};

use super::common::{describe_experiment, load_experiment, print_width_sweep};

/// Execute the width command.
pub fn execute(config: &str, qubits: u32) -> Result<()> {
    let experiment = load_experiment(config)?;
    let backend = experiment_backend(&experiment)?;

    println!(
        "{} {}",
        style("Depth sweep").cyan().bold(),
        describe_experiment(&experiment)
    );
    println!();

    let sweep = get_metrics_single_width(&backend, &experiment.circuit_params, qubits)?;
    print_width_sweep(&sweep);

    Ok(())
}
