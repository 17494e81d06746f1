//! Named metric series.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{MetricError, MetricResult};

/// Von Neumann entropy density rows, one per width.
pub const VND_SERIES: &str = "all_vNd_diff_n";
/// Purity rows, one per width.
pub const PUR_SERIES: &str = "all_pur_diff_n";
/// Rényi-2 entropy density rows, one per width.
pub const R2D_SERIES: &str = "all_R2d_diff_n";
/// Series filled by a width sweep.
pub const SWEEP_SERIES: [&str; 3] = [VND_SERIES, PUR_SERIES, R2D_SERIES];

/// A fixed set of named series, each a list of rows.
///
/// The names are fixed at construction; accessing any other name is an
/// error rather than silently creating a series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metrics {
    series: BTreeMap<String, Vec<Vec<f64>>>,
}

impl Metrics {
    /// Create empty series for `names`.
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            series: names.into_iter().map(|n| (n.into(), Vec::new())).collect(),
        }
    }

    /// Container with the three sweep series.
    pub fn for_sweep() -> Self {
        Self::new(SWEEP_SERIES)
    }

    /// Append a row to `name`.
    pub fn push(&mut self, name: &str, row: Vec<f64>) -> MetricResult<()> {
        self.get_mut(name)?.push(row);
        Ok(())
    }

    /// Rows of `name`.
    pub fn get(&self, name: &str) -> MetricResult<&[Vec<f64>]> {
        self.series
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| MetricError::UnknownSeries(name.to_string()))
    }

    /// Mutable rows of `name`.
    pub fn get_mut(&mut self, name: &str) -> MetricResult<&mut Vec<Vec<f64>>> {
        self.series
            .get_mut(name)
            .ok_or_else(|| MetricError::UnknownSeries(name.to_string()))
    }

    /// Registered series names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.series.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get() {
        let mut metrics = Metrics::for_sweep();
        metrics.push(VND_SERIES, vec![0.1, 0.2]).unwrap();
        metrics.push(VND_SERIES, vec![0.3]).unwrap();
        assert_eq!(metrics.get(VND_SERIES).unwrap().len(), 2);
        assert!(metrics.get(PUR_SERIES).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_series_is_an_error() {
        let mut metrics = Metrics::for_sweep();
        assert!(matches!(
            metrics.push("all_vnd", vec![]),
            Err(MetricError::UnknownSeries(name)) if name == "all_vnd"
        ));
        assert!(metrics.get("missing").is_err());
        assert!(!metrics.contains("missing"));
    }

    #[test]
    fn test_names_sorted() {
        let metrics = Metrics::new(["b", "a"]);
        assert_eq!(metrics.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_serializes_as_map() {
        let mut metrics = Metrics::new([PUR_SERIES]);
        metrics.push(PUR_SERIES, vec![1.0, 0.5]).unwrap();
        let json = serde_json::to_string(&metrics).unwrap();
        assert_eq!(json, r#"{"all_pur_diff_n":[[1.0,0.5]]}"#);
    }
}
