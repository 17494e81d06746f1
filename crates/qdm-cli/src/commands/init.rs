//! Init command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qdm_metrics::ExperimentParams;

/// Execute the init command.
pub fn execute(output: &str, force: bool) -> Result<()> {
    let path = Path::new(output);
    if path.exists() && !force {
        anyhow::bail!("{output} already exists (use --force to overwrite)");
    }

    ExperimentParams::template()
        .to_file(path)
        .with_context(|| format!("Failed to write experiment: {output}"))?;

    println!(
        "{} Wrote template experiment to {}",
        style("✓").green().bold(),
        style(output).cyan()
    );
    Ok(())
}
