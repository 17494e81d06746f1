//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - entanglement metrics of noisy density matrices",
        style("QDM").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qdm-ir           Circuit intermediate representation");
    println!("  qdm-circuits     Layered circuit families");
    println!("  qdm-adapter-sim  Density-matrix simulator backend");
    println!("  qdm-metrics      Entropy and purity sweeps");
    println!("  qdm-cli          Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
