//! Circuit sweep parameters.

use serde::{Deserialize, Serialize};

use crate::basis::GateChoice;
use crate::error::{CircuitError, CircuitResult};

/// Parameters describing the family of circuits and the sweep over
/// depth and width.
///
/// Both ranges are inclusive. A minimum greater than its maximum is an
/// empty sweep, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitParams {
    /// Circuit family.
    pub choice: GateChoice,
    /// First depth (number of layers) of the sweep.
    pub depth_min: usize,
    /// Last depth of the sweep.
    pub depth_max: usize,
    /// Number of layers added between consecutive depth points.
    pub depth_step: usize,
    /// First width (number of qubits) of the sweep.
    pub num_qubits_min: u32,
    /// Last width of the sweep.
    pub num_qubits_max: u32,
    /// Width increment between consecutive sweeps.
    pub num_qubits_step: u32,
    /// Seed for the layer angle generator.
    pub seed: u64,
    /// Start every circuit with a Hadamard on each qubit.
    pub initial_hadamard: bool,
}

impl Default for CircuitParams {
    fn default() -> Self {
        Self {
            choice: GateChoice::default(),
            depth_min: 1,
            depth_max: 10,
            depth_step: 1,
            num_qubits_min: 2,
            num_qubits_max: 4,
            num_qubits_step: 1,
            seed: 42,
            initial_hadamard: false,
        }
    }
}

impl CircuitParams {
    /// Check that both sweeps terminate and every width is usable.
    pub fn validate(&self) -> CircuitResult<()> {
        if self.depth_step == 0 {
            return Err(CircuitError::ZeroStep { axis: "depth" });
        }
        if self.num_qubits_step == 0 {
            return Err(CircuitError::ZeroStep { axis: "num_qubits" });
        }
        if self.num_qubits_min == 0 && self.num_qubits_min <= self.num_qubits_max {
            return Err(CircuitError::ZeroWidth);
        }
        Ok(())
    }

    /// Depth points of the sweep, in order.
    pub fn depths(&self) -> CircuitResult<Vec<usize>> {
        if self.depth_step == 0 {
            return Err(CircuitError::ZeroStep { axis: "depth" });
        }
        Ok((self.depth_min..=self.depth_max)
            .step_by(self.depth_step)
            .collect())
    }

    /// Widths of the sweep, in order.
    pub fn widths(&self) -> CircuitResult<Vec<u32>> {
        if self.num_qubits_step == 0 {
            return Err(CircuitError::ZeroStep { axis: "num_qubits" });
        }
        Ok((self.num_qubits_min..=self.num_qubits_max)
            .step_by(self.num_qubits_step as usize)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let params = CircuitParams::default();
        params.validate().unwrap();
        assert_eq!(params.depths().unwrap(), (1..=10).collect::<Vec<_>>());
        assert_eq!(params.widths().unwrap(), vec![2, 3, 4]);
    }

    #[test]
    fn test_stepped_ranges_are_inclusive() {
        let params = CircuitParams {
            depth_min: 2,
            depth_max: 8,
            depth_step: 3,
            num_qubits_min: 1,
            num_qubits_max: 5,
            num_qubits_step: 2,
            ..CircuitParams::default()
        };
        assert_eq!(params.depths().unwrap(), vec![2, 5, 8]);
        assert_eq!(params.widths().unwrap(), vec![1, 3, 5]);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let params = CircuitParams {
            depth_min: 5,
            depth_max: 2,
            ..CircuitParams::default()
        };
        params.validate().unwrap();
        assert!(params.depths().unwrap().is_empty());
    }

    #[test]
    fn test_zero_step_rejected() {
        let params = CircuitParams {
            depth_step: 0,
            ..CircuitParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(CircuitError::ZeroStep { axis: "depth" })
        ));
        assert!(params.depths().is_err());
    }

    #[test]
    fn test_zero_width_rejected() {
        let params = CircuitParams {
            num_qubits_min: 0,
            ..CircuitParams::default()
        };
        assert!(matches!(params.validate(), Err(CircuitError::ZeroWidth)));
    }

    #[test]
    fn test_partial_yaml_like_json_uses_defaults() {
        let params: CircuitParams =
            serde_json::from_str(r#"{"choice": "u_cx", "depth_max": 4}"#).unwrap();
        assert_eq!(params.choice, GateChoice::UCx);
        assert_eq!(params.depth_max, 4);
        assert_eq!(params.depth_min, 1);
        assert_eq!(params.seed, 42);
    }
}
