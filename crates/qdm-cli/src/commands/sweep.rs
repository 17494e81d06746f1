//! Sweep command implementation.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qdm_metrics::{ExportConfig, sweep_report_with, to_file};

use super::common::{describe_experiment, load_experiment, print_width_sweep};

/// Execute the sweep command.
pub fn execute(config: &str, export: Option<&str>, compact: bool) -> Result<()> {
    let experiment = load_experiment(config)?;
    let widths = experiment.circuit_params.widths()?;

    println!(
        "{} {}",
        style("Sweeping").cyan().bold(),
        describe_experiment(&experiment)
    );
    println!();

    let pb = ProgressBar::new(widths.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} widths {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let start = Instant::now();
    let report = sweep_report_with(&experiment, |sweep| {
        pb.suspend(|| {
            print_width_sweep(sweep);
            println!();
        });
        pb.set_message(format!("(last: {}q)", sweep.num_qubits));
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    println!(
        "{} {} widths in {:.2?}",
        style("✓").green().bold(),
        report.sweeps.len(),
        start.elapsed()
    );

    if let Some(path) = export {
        let export_config = ExportConfig { pretty: !compact };
        to_file(&report, Path::new(path), &export_config)
            .with_context(|| format!("Failed to export report: {path}"))?;
        println!("  {} {}", style("Report:").bold(), path);
    }

    Ok(())
}
