//! Stationary iterative solvers for dense linear systems
//!
//! All solvers take a square matrix `A`, a solution vector `x` that holds the
//! initial guess on entry and the result on exit, and a load vector `b`.

pub mod jacobi;
pub mod sor;
pub mod ssor;

use serde::{Deserialize, Serialize};

use crate::error::{TrussError, TrussResult};
use crate::math::{Mat, Vector};

/// Outcome of an iterative solve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveReport {
    /// Number of sweeps executed
    pub iterations: usize,
    /// Whether the convergence criterion was met before the iteration cap
    pub converged: bool,
}

impl SolveReport {
    pub(crate) fn new(iterations: usize, converged: bool) -> Self {
        if !converged {
            log::warn!(
                "Iterative solve did not converge after {} iterations",
                iterations
            );
        }
        Self {
            iterations,
            converged,
        }
    }
}

/// Check shapes and diagonal before iterating
pub(crate) fn check_system(a: &Mat, x: &Vector, b: &Vector) -> TrussResult<()> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(TrussError::DimensionMismatch(format!(
            "matrix is {}x{}, expected square",
            n,
            a.ncols()
        )));
    }
    if x.len() != n || b.len() != n {
        return Err(TrussError::DimensionMismatch(format!(
            "matrix has {} rows but x has {} and b has {} entries",
            n,
            x.len(),
            b.len()
        )));
    }
    if let Some(row) = (0..n).find(|&i| a[(i, i)] == 0.0) {
        return Err(TrussError::ZeroPivot(row));
    }
    Ok(())
}

/// Relaxation sweep over the given rows using the latest values of `x`
///
/// Returns the sum of squared updates applied during the sweep.
pub(crate) fn relaxation_sweep(
    a: &Mat,
    x: &mut Vector,
    b: &Vector,
    omega: f64,
    rows: impl Iterator<Item = usize>,
) -> f64 {
    let n = a.nrows();
    let mut update_sq = 0.0;
    for i in rows {
        let mut sigma = b[i];
        for j in 0..n {
            if j != i {
                sigma -= a[(i, j)] * x[j];
            }
        }
        let x_new = (1.0 - omega) * x[i] + omega * sigma / a[(i, i)];
        let update = x_new - x[i];
        update_sq += update * update;
        x[i] = x_new;
    }
    update_sq
}

pub(crate) fn warn_on_relaxation(omega: f64) {
    if !(omega > 0.0 && omega < 2.0) {
        log::warn!(
            "Relaxation factor {} lies outside (0, 2); the iteration is not expected to converge",
            omega
        );
    }
}
