//! Gates command implementation.

use anyhow::Result;
use console::style;

use qdm_circuits::{GateChoice, SimulationMethod, define_gates};

/// Execute the gates command.
pub fn execute(choice: &str, method: &str) -> Result<()> {
    let choice: GateChoice = choice.parse()?;
    let method: SimulationMethod = method.parse()?;
    let basis = define_gates(choice, method);

    println!(
        "{} {} ({})",
        style("Basis gates").cyan().bold(),
        choice,
        method
    );
    println!("  {}", basis.gates().join(", "));

    Ok(())
}
