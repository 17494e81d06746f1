//! Entropy and purity of density matrices.
//!
//! | Metric | Definition |
//! |--------|------------|
//! | von Neumann entropy | `S(ρ) = -Σ λ log_b λ` over eigenvalues `λ > 0` |
//! | purity | `Tr(ρ²)` |
//! | Rényi-2 entropy | `S₂(ρ) = -log_b Tr(ρ²)` |
//!
//! Densities divide the base-2 entropies by the number of qubits, so a
//! maximally mixed state has density 1 at any width.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use qdm_adapter_sim::DensityMatrix;

use crate::error::{MetricError, MetricResult};

fn check_base(base: f64) -> MetricResult<f64> {
    if base.is_finite() && base > 0.0 && base != 1.0 {
        Ok(base.ln())
    } else {
        Err(MetricError::InvalidBase(base))
    }
}

fn num_qubits(rho: &DensityMatrix) -> MetricResult<f64> {
    match rho.num_qubits() {
        0 => Err(MetricError::ZeroWidth),
        n => Ok(n as f64),
    }
}

/// Von Neumann entropy in logarithm base `base`.
///
/// Eigenvalues are clipped at zero first; zero eigenvalues contribute
/// nothing.
pub fn von_neumann_entropy(rho: &DensityMatrix, base: f64) -> MetricResult<f64> {
    let ln_base = check_base(base)?;
    let s: f64 = rho
        .eigenvalues()
        .into_iter()
        .map(|l| l.max(0.0))
        .filter(|&l| l > 0.0)
        .map(|l| -l * l.ln())
        .sum();
    Ok(s / ln_base)
}

/// `Tr(ρ²)` as computed, including its (rounding-level) imaginary part.
pub fn purity(rho: &DensityMatrix) -> Complex64 {
    rho.purity()
}

/// Second-order Rényi entropy `-log_b Re Tr(ρ²)`.
pub fn renyi2_entropy(rho: &DensityMatrix, base: f64) -> MetricResult<f64> {
    let ln_base = check_base(base)?;
    Ok(-rho.purity().re.ln() / ln_base)
}

/// Base-2 von Neumann entropy per qubit.
pub fn von_neumann_density(rho: &DensityMatrix) -> MetricResult<f64> {
    let n = num_qubits(rho)?;
    Ok(von_neumann_entropy(rho, 2.0)? / n)
}

/// Base-2 Rényi-2 entropy per qubit.
pub fn renyi2_density(rho: &DensityMatrix) -> MetricResult<f64> {
    let n = num_qubits(rho)?;
    Ok(renyi2_entropy(rho, 2.0)? / n)
}

/// The three metrics reported for one sweep point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateMetrics {
    /// Von Neumann entropy density.
    pub vnd: f64,
    /// Real part of the purity.
    pub pur: f64,
    /// Rényi-2 entropy density.
    pub r2d: f64,
}

impl StateMetrics {
    /// Compute all three metrics of `rho`.
    pub fn of(rho: &DensityMatrix) -> MetricResult<Self> {
        let n = num_qubits(rho)?;
        let pur = purity(rho).re;
        Ok(Self {
            vnd: von_neumann_entropy(rho, 2.0)? / n,
            pur,
            r2d: -pur.log2() / n,
        })
    }
}
