//! Sweep results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entropy::StateMetrics;
use crate::error::MetricResult;
use crate::metrics::{Metrics, PUR_SERIES, R2D_SERIES, VND_SERIES};
use crate::params::ExperimentParams;

/// Report schema version.
pub const SCHEMA_VERSION: &str = "1.0";

/// Depth sweep at one width: one entry per depth point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidthSweep {
    /// Circuit width.
    pub num_qubits: u32,
    /// Depth of each point.
    pub depths: Vec<usize>,
    /// Von Neumann entropy density per depth.
    pub vnd: Vec<f64>,
    /// Purity per depth.
    pub pur: Vec<f64>,
    /// Rényi-2 entropy density per depth.
    pub r2d: Vec<f64>,
}

impl WidthSweep {
    /// Empty sweep at `num_qubits`.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            depths: Vec::new(),
            vnd: Vec::new(),
            pur: Vec::new(),
            r2d: Vec::new(),
        }
    }

    /// Record the metrics at `depth`.
    pub fn push(&mut self, depth: usize, metrics: StateMetrics) {
        self.depths.push(depth);
        self.vnd.push(metrics.vnd);
        self.pur.push(metrics.pur);
        self.r2d.push(metrics.r2d);
    }

    /// Number of depth points.
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    /// Whether no depth point was recorded.
    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// `(depth, metrics)` pairs in sweep order.
    pub fn points(&self) -> impl Iterator<Item = (usize, StateMetrics)> + '_ {
        self.depths.iter().enumerate().map(|(i, &d)| {
            (
                d,
                StateMetrics {
                    vnd: self.vnd[i],
                    pur: self.pur[i],
                    r2d: self.r2d[i],
                },
            )
        })
    }
}

/// Full multi-width sweep with the configuration that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    /// Schema version for forward compatibility.
    pub schema_version: String,
    /// Version of the tool that produced the report.
    pub qdm_version: String,
    /// Time the sweep finished.
    pub timestamp: DateTime<Utc>,
    /// Experiment configuration.
    pub experiment: ExperimentParams,
    /// Depth axis.
    pub depths: Vec<usize>,
    /// Width axis.
    pub widths: Vec<u32>,
    /// One sweep per width, in width order.
    pub sweeps: Vec<WidthSweep>,
}

impl SweepReport {
    /// Report over the given axes with sweeps still to be added.
    pub fn new(experiment: ExperimentParams, depths: Vec<usize>, widths: Vec<u32>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.into(),
            qdm_version: env!("CARGO_PKG_VERSION").into(),
            timestamp: Utc::now(),
            experiment,
            depths,
            widths,
            sweeps: Vec::new(),
        }
    }

    /// The three sweep series, one row per width.
    pub fn metrics(&self) -> MetricResult<Metrics> {
        let mut metrics = Metrics::for_sweep();
        for sweep in &self.sweeps {
            metrics.push(VND_SERIES, sweep.vnd.clone())?;
            metrics.push(PUR_SERIES, sweep.pur.clone())?;
            metrics.push(R2D_SERIES, sweep.r2d.clone())?;
        }
        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(v: f64) -> StateMetrics {
        StateMetrics {
            vnd: v,
            pur: 1.0 - v,
            r2d: v / 2.0,
        }
    }

    #[test]
    fn test_width_sweep_points() {
        let mut sweep = WidthSweep::new(3);
        assert!(sweep.is_empty());
        sweep.push(1, point(0.1));
        sweep.push(2, point(0.2));
        assert_eq!(sweep.len(), 2);
        let points: Vec<_> = sweep.points().collect();
        assert_eq!(points[1], (2, point(0.2)));
    }

    #[test]
    fn test_report_metrics_rows_per_width() {
        let mut report = SweepReport::new(ExperimentParams::default(), vec![1, 2], vec![2, 3]);
        for n in [2, 3] {
            let mut sweep = WidthSweep::new(n);
            sweep.push(1, point(0.1));
            sweep.push(2, point(0.3));
            report.sweeps.push(sweep);
        }
        let metrics = report.metrics().unwrap();
        assert_eq!(metrics.get(VND_SERIES).unwrap(), &[vec![0.1, 0.3], vec![0.1, 0.3]]);
        assert_eq!(metrics.get(R2D_SERIES).unwrap()[0], vec![0.05, 0.15]);
        assert_eq!(report.schema_version, SCHEMA_VERSION);
    }
}
