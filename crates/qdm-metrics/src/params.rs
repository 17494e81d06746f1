//! Experiment configuration.
//!
//! An experiment file bundles the circuit sweep, the backend noise model and
//! the backend settings. Files ending in `.yaml`/`.yml` are read as YAML,
//! `.json` as JSON. Missing fields take their defaults.
//!
//! ```yaml
//! circuit_params:
//!   choice: ry_cx
//!   depth_min: 1
//!   depth_max: 10
//!   num_qubits_min: 2
//!   num_qubits_max: 4
//! noise_params:
//!   depolarizing_1q: 0.001
//!   depolarizing_2q: 0.01
//! backend_params:
//!   max_qubits: 8
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use qdm_adapter_sim::{BackendParams, NoiseParams};
use qdm_circuits::CircuitParams;

use crate::error::{MetricError, MetricResult};

/// Everything needed to run a depth/width sweep.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentParams {
    /// Circuit family and sweep ranges.
    pub circuit_params: CircuitParams,
    /// Gate-attached noise model.
    pub noise_params: NoiseParams,
    /// Backend settings.
    pub backend_params: BackendParams,
}

/// Experiment file encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML (`.yaml`, `.yml`).
    Yaml,
    /// JSON (`.json`).
    Json,
}

impl ConfigFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> MetricResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "json" => Ok(ConfigFormat::Json),
            _ => Err(MetricError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl ExperimentParams {
    /// A small noisy experiment used as a starting template.
    pub fn template() -> Self {
        Self {
            noise_params: NoiseParams {
                depolarizing_1q: 0.001,
                depolarizing_2q: 0.01,
                amplitude_damping: 0.002,
                ..NoiseParams::default()
            },
            ..Self::default()
        }
    }

    /// Load and validate an experiment file.
    pub fn from_file(path: impl AsRef<Path>) -> MetricResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)
            .map_err(|e| MetricError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::parse(&contents, format)
    }

    /// Parse and validate experiment text.
    pub fn parse(contents: &str, format: ConfigFormat) -> MetricResult<Self> {
        let params: Self = match format {
            ConfigFormat::Yaml => serde_yaml_ng::from_str(contents)?,
            ConfigFormat::Json => {
                serde_json::from_str(contents).map_err(|e| MetricError::Parse(e.to_string()))?
            }
        };
        params.validate()?;
        Ok(params)
    }

    /// Serialize in `format`.
    pub fn render(&self, format: ConfigFormat) -> MetricResult<String> {
        match format {
            ConfigFormat::Yaml => {
                serde_yaml_ng::to_string(self).map_err(|e| MetricError::Export(e.to_string()))
            }
            ConfigFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// Write to `path`, choosing the format from its extension.
    pub fn to_file(&self, path: impl AsRef<Path>) -> MetricResult<()> {
        let path = path.as_ref();
        let text = self.render(ConfigFormat::from_path(path)?)?;
        std::fs::write(path, text)
            .map_err(|e| MetricError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }

    /// Check sweep ranges and noise rates.
    pub fn validate(&self) -> MetricResult<()> {
        self.circuit_params.validate()?;
        self.noise_params.validate()?;
        Ok(())
    }
}
