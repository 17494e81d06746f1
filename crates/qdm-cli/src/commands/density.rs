//! Density command implementation.

use anyhow::Result;
use console::style;

use qdm_adapter_sim::DensityMatrix;
use qdm_circuits::{CircuitParams, init_circuit};
use qdm_metrics::{StateMetrics, experiment_backend, get_output_density_matrix};

use super::common::load_experiment;

/// Largest width whose matrix is printed element by element.
const MAX_PRINTED_QUBITS: usize = 4;

/// Execute the density command.
pub fn execute(config: &str, qubits: u32, depth: usize, show_matrix: bool) -> Result<()> {
    let experiment = load_experiment(config)?;
    let backend = experiment_backend(&experiment)?;

    let params = CircuitParams {
        depth_min: depth,
        ..experiment.circuit_params.clone()
    };
    let circuit = init_circuit(&params, qubits)?;

    println!(
        "{} {} ({} qubits, {} layers)",
        style("Circuit").cyan().bold(),
        circuit.name(),
        qubits,
        depth
    );
    println!("  Operations:  {}", circuit.num_ops());
    println!("  2q gates:    {}", circuit.num_multi_qubit_gates());
    println!("  Depth:       {}", circuit.depth());
    println!();

    let rho = get_output_density_matrix(&circuit, &backend)?;
    let metrics = StateMetrics::of(&rho)?;

    println!("{}", style("Metrics").bold());
    println!("  vNd: {:.6}", metrics.vnd);
    println!("  pur: {:.6}", metrics.pur);
    println!("  R2d: {:.6}", metrics.r2d);
    println!();

    println!("{}", style("Leading eigenvalues").bold());
    for (i, lambda) in rho.eigenvalues().iter().take(8).enumerate() {
        println!("  λ{i}: {lambda:.6}");
    }

    if show_matrix {
        println!();
        if rho.num_qubits() > MAX_PRINTED_QUBITS {
            println!(
                "  {} matrix display is limited to {} qubits",
                style("Note:").yellow(),
                MAX_PRINTED_QUBITS
            );
        } else {
            print_matrix(&rho);
        }
    }

    Ok(())
}

fn print_matrix(rho: &DensityMatrix) {
    println!("{}", style("Density matrix").bold());
    for row in 0..rho.dim() {
        let cells: Vec<String> = (0..rho.dim())
            .map(|col| {
                let z = rho.get(row, col);
                format!("{:+.4}{:+.4}i", z.re, z.im)
            })
            .collect();
        println!("  {}", cells.join("  "));
    }
}
