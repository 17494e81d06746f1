//! Property tests for gate matrices and noise channels.

use num_complex::Complex64;
use proptest::prelude::*;
use qdm_ir::{GateMatrix, NoiseModel, StandardGate};

const TOL: f64 = 1e-10;

/// `Σ K†K` for a set of Kraus operators.
fn completeness(ops: &[GateMatrix]) -> Vec<Complex64> {
    let dim = ops[0].dim();
    let mut sum = vec![Complex64::new(0.0, 0.0); dim * dim];
    for k in ops {
        for i in 0..dim {
            for j in 0..dim {
                for m in 0..dim {
                    sum[i * dim + j] += k.get(m, i).conj() * k.get(m, j);
                }
            }
        }
    }
    sum
}

fn is_identity(data: &[Complex64], dim: usize) -> bool {
    (0..dim).all(|i| {
        (0..dim).all(|j| {
            let expected = if i == j { 1.0 } else { 0.0 };
            (data[i * dim + j] - Complex64::new(expected, 0.0)).norm() < TOL
        })
    })
}

fn arb_rotation() -> impl Strategy<Value = StandardGate> {
    let angle = -10.0_f64..10.0;
    prop_oneof![
        angle.clone().prop_map(|t| StandardGate::Rx(t.into())),
        angle.clone().prop_map(|t| StandardGate::Ry(t.into())),
        angle.clone().prop_map(|t| StandardGate::Rz(t.into())),
        angle.clone().prop_map(|t| StandardGate::P(t.into())),
        angle.clone().prop_map(|t| StandardGate::CRz(t.into())),
        angle.clone().prop_map(|t| StandardGate::RZZ(t.into())),
        (angle.clone(), angle.clone(), angle)
            .prop_map(|(a, b, c)| StandardGate::U(a.into(), b.into(), c.into())),
    ]
}

fn arb_channel() -> impl Strategy<Value = NoiseModel> {
    let rate = 0.0_f64..=1.0;
    prop_oneof![
        rate.clone().prop_map(|p| NoiseModel::Depolarizing { p }),
        rate.clone().prop_map(|gamma| NoiseModel::AmplitudeDamping { gamma }),
        rate.clone().prop_map(|gamma| NoiseModel::PhaseDamping { gamma }),
        rate.clone().prop_map(|p| NoiseModel::BitFlip { p }),
        rate.prop_map(|p| NoiseModel::PhaseFlip { p }),
    ]
}

proptest! {
    #[test]
    fn rotations_are_unitary(gate in arb_rotation()) {
        let m = gate.matrix().unwrap();
        prop_assert_eq!(m.num_qubits, gate.num_qubits());
        prop_assert!(m.is_unitary(TOL));
        prop_assert!(m.dagger().is_unitary(TOL));
    }

    #[test]
    fn channels_are_trace_preserving(model in arb_channel()) {
        let ops = model.kraus_operators(1).unwrap();
        prop_assert!(is_identity(&completeness(&ops), 2));
    }

    #[test]
    fn joint_depolarizing_is_trace_preserving(p in 0.0_f64..=1.0, k in 1_u32..=2) {
        let ops = NoiseModel::Depolarizing { p }.kraus_operators(k).unwrap();
        prop_assert_eq!(ops.len(), 1 << (2 * k));
        prop_assert!(is_identity(&completeness(&ops), 1 << k));
    }

    #[test]
    fn out_of_range_rates_are_rejected(p in 1.0001_f64..5.0) {
        let bit_flip = NoiseModel::BitFlip { p }.validate();
        prop_assert!(bit_flip.is_err());
        let depolarizing = NoiseModel::Depolarizing { p: -p }.kraus_operators(1);
        prop_assert!(depolarizing.is_err());
    }
}

#[test]
fn readout_error_has_no_kraus_operators() {
    let ops = NoiseModel::ReadoutError { p: 0.1 }.kraus_operators(1).unwrap();
    assert!(ops.is_empty());
}
