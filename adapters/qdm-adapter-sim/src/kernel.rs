//! Index helpers shared by the statevector and density-matrix engines.
//!
//! Qubit `q` is bit `q` of a global basis index. A `k`-qubit operator uses a
//! local index in which the first operand is the most significant bit, so
//! local bit `k - 1 - t` maps to `qubits[t]`.

use num_complex::Complex64;

use qdm_ir::GateMatrix;

/// Global offset of each local basis state of `qubits`.
pub(crate) fn local_offsets(qubits: &[usize]) -> Vec<usize> {
    let k = qubits.len();
    (0..1usize << k)
        .map(|local| {
            qubits
                .iter()
                .enumerate()
                .filter(|&(t, _)| (local >> (k - 1 - t)) & 1 == 1)
                .fold(0, |acc, (_, &q)| acc | (1 << q))
        })
        .collect()
}

/// Bit mask of all operand qubits.
pub(crate) fn operand_mask(qubits: &[usize]) -> usize {
    qubits.iter().fold(0, |acc, &q| acc | (1 << q))
}

/// Apply `m` to the local subspace at `offsets`, addressed through `index`.
///
/// With `conjugate` the elementwise conjugate of `m` is applied instead.
/// Applied along a density-matrix row, that is right multiplication by `m†`:
/// `(ρ·m†)[r, c] = Σ_l ρ[r, l]·conj(m[c, l])`.
#[inline]
pub(crate) fn apply_local(
    data: &mut [Complex64],
    m: &GateMatrix,
    offsets: &[usize],
    index: impl Fn(usize) -> usize,
    scratch: &mut [Complex64],
    conjugate: bool,
) {
    let d = offsets.len();
    for (l, &off) in offsets.iter().enumerate() {
        scratch[l] = data[index(off)];
    }
    for (r, &off) in offsets.iter().enumerate() {
        let mut acc = Complex64::new(0.0, 0.0);
        for (l, s) in scratch.iter().take(d).enumerate() {
            let u = if conjugate {
                m.get(r, l).conj()
            } else {
                m.get(r, l)
            };
            acc += u * s;
        }
        data[index(off)] = acc;
    }
}
