//! JSON export of sweep reports.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{MetricError, MetricResult};
use crate::report::SweepReport;

/// Export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Whether to pretty-print JSON output.
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Serialize a sweep report to a JSON string.
pub fn to_json(report: &SweepReport, config: &ExportConfig) -> MetricResult<String> {
    let json = if config.pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}

/// Write a sweep report to a JSON file.
pub fn to_file(report: &SweepReport, path: &Path, config: &ExportConfig) -> MetricResult<()> {
    let json = to_json(report, config)?;
    std::fs::write(path, json)
        .map_err(|e| MetricError::Io(format!("Failed to write {}: {}", path.display(), e)))
}

/// Read a report written by [`to_file`].
pub fn from_file(path: &Path) -> MetricResult<SweepReport> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| MetricError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&text).map_err(|e| MetricError::Parse(e.to_string()))
}
