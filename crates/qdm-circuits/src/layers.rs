//! Layer-by-layer circuit construction.
//!
//! A circuit of depth `d` is `d` layers, numbered `0..d` from the start of
//! the circuit. Layer `k` only depends on `(seed, k, width)`, so growing a
//! circuit one step at a time gives the same gates as building it at the
//! target depth in one go.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::{FRAC_PI_2, TAU};
use tracing::trace;

use qdm_ir::{Circuit, QubitId, StandardGate};

use crate::basis::GateChoice;
use crate::error::{CircuitError, CircuitResult};
use crate::params::CircuitParams;

/// Golden-ratio increment used to decorrelate per-layer seeds.
const LAYER_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Build the sweep's starting circuit: `params.depth_min` layers on
/// `num_qubits` qubits, after the Hadamard column if
/// `params.initial_hadamard` is set.
pub fn init_circuit(params: &CircuitParams, num_qubits: u32) -> CircuitResult<Circuit> {
    if num_qubits == 0 {
        return Err(CircuitError::ZeroWidth);
    }
    let mut circuit = Circuit::with_size(format!("{}_{num_qubits}q", params.choice), num_qubits, 0);
    if params.initial_hadamard {
        for q in 0..num_qubits {
            hadamard(params.choice, &mut circuit, QubitId(q))?;
        }
    }
    for layer in 0..params.depth_min {
        add_circuit_layer(params, num_qubits, &mut circuit, layer)?;
    }
    Ok(circuit)
}

/// Append layer number `layer_index` to `circuit`.
pub fn add_circuit_layer(
    params: &CircuitParams,
    num_qubits: u32,
    circuit: &mut Circuit,
    layer_index: usize,
) -> CircuitResult<()> {
    if circuit.num_qubits() != num_qubits as usize {
        return Err(CircuitError::WidthMismatch {
            expected: num_qubits,
            actual: circuit.num_qubits(),
        });
    }

    let mut rng = layer_rng(params.seed, layer_index);
    let qubits: Vec<QubitId> = (0..num_qubits).map(QubitId).collect();

    for &q in &qubits {
        rotation_block(params.choice, circuit, q, &mut rng)?;
    }
    entangling_block(params.choice, circuit, &qubits, layer_index)?;

    trace!(
        layer = layer_index,
        num_qubits,
        ops = circuit.num_ops(),
        "appended circuit layer"
    );
    Ok(())
}

fn hadamard(choice: GateChoice, circuit: &mut Circuit, q: QubitId) -> CircuitResult<()> {
    if choice == GateChoice::IbmNative {
        // H = Rz(π/2)·Sx·Rz(π/2) up to a global phase.
        circuit.rz(FRAC_PI_2, q)?.sx(q)?.rz(FRAC_PI_2, q)?;
    } else {
        circuit.h(q)?;
    }
    Ok(())
}

fn layer_rng(seed: u64, layer_index: usize) -> StdRng {
    let mixed = seed ^ (layer_index as u64 + 1).wrapping_mul(LAYER_SEED_STRIDE);
    StdRng::seed_from_u64(mixed)
}

fn angle(rng: &mut StdRng) -> f64 {
    rng.gen_range(0.0..TAU)
}

fn rotation_block(
    choice: GateChoice,
    circuit: &mut Circuit,
    q: QubitId,
    rng: &mut StdRng,
) -> CircuitResult<()> {
    match choice {
        GateChoice::RyCx => {
            circuit.ry(angle(rng), q)?;
        }
        GateChoice::RxyzCz => {
            circuit.rx(angle(rng), q)?.ry(angle(rng), q)?.rz(angle(rng), q)?;
        }
        GateChoice::UCx => {
            circuit.u(angle(rng), angle(rng), angle(rng), q)?;
        }
        GateChoice::IbmNative => {
            // Euler form Rz·Sx·Rz·Sx·Rz reaches every single-qubit unitary.
            circuit
                .rz(angle(rng), q)?
                .sx(q)?
                .rz(angle(rng), q)?
                .sx(q)?
                .rz(angle(rng), q)?;
        }
        GateChoice::Clifford => {
            let gate = match rng.gen_range(0..6) {
                0 => StandardGate::H,
                1 => StandardGate::S,
                2 => StandardGate::Sdg,
                3 => StandardGate::X,
                4 => StandardGate::Y,
                _ => StandardGate::Z,
            };
            circuit.apply(qdm_ir::Instruction::single_qubit_gate(gate, q))?;
        }
    }
    Ok(())
}

fn entangling_block(
    choice: GateChoice,
    circuit: &mut Circuit,
    qubits: &[QubitId],
    layer_index: usize,
) -> CircuitResult<()> {
    match choice {
        GateChoice::RyCx => {
            for pair in qubits.windows(2) {
                circuit.cx(pair[0], pair[1])?;
            }
        }
        GateChoice::RxyzCz | GateChoice::Clifford => {
            for (a, b) in brickwork_pairs(qubits, layer_index) {
                circuit.cz(a, b)?;
            }
        }
        GateChoice::UCx | GateChoice::IbmNative => {
            for (a, b) in brickwork_pairs(qubits, layer_index) {
                circuit.cx(a, b)?;
            }
        }
    }
    Ok(())
}

/// Nearest-neighbour pairs starting at qubit 0 on even layers and qubit 1
/// on odd layers.
fn brickwork_pairs(qubits: &[QubitId], layer_index: usize) -> Vec<(QubitId, QubitId)> {
    let offset = layer_index % 2;
    qubits
        .get(offset..)
        .unwrap_or(&[])
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brickwork_alternates() {
        let qubits: Vec<QubitId> = (0..5).map(QubitId).collect();
        assert_eq!(
            brickwork_pairs(&qubits, 0),
            vec![(QubitId(0), QubitId(1)), (QubitId(2), QubitId(3))]
        );
        assert_eq!(
            brickwork_pairs(&qubits, 1),
            vec![(QubitId(1), QubitId(2)), (QubitId(3), QubitId(4))]
        );
    }

    #[test]
    fn test_brickwork_single_qubit_is_empty() {
        let qubits = [QubitId(0)];
        assert!(brickwork_pairs(&qubits, 0).is_empty());
        assert!(brickwork_pairs(&qubits, 1).is_empty());
    }

    #[test]
    fn test_layer_rng_depends_on_layer() {
        let a = angle(&mut layer_rng(7, 0));
        let b = angle(&mut layer_rng(7, 1));
        let again = angle(&mut layer_rng(7, 0));
        assert_ne!(a, b);
        assert_eq!(a, again);
    }
}
