//! Successive over-relaxation (Gauss-Seidel when omega = 1)

use log::debug;

use super::{check_system, relaxation_sweep, warn_on_relaxation, SolveReport};
use crate::error::TrussResult;
use crate::math::{Mat, Vector};

/// Default iteration cap
pub const MAX_ITERATIONS: usize = 1000;

/// Solve `A x = b` by SOR with the default iteration cap
pub fn solve(
    a: &Mat,
    x: &mut Vector,
    b: &Vector,
    tolerance: f64,
    omega: f64,
) -> TrussResult<SolveReport> {
    solve_with_limit(a, x, b, tolerance, omega, MAX_ITERATIONS)
}

/// Solve `A x = b` by SOR
///
/// Rows are visited in ascending order and each row uses the values already
/// updated in the current sweep. Converged when the L2 norm of the sweep's
/// updates is at most `tolerance`.
pub fn solve_with_limit(
    a: &Mat,
    x: &mut Vector,
    b: &Vector,
    tolerance: f64,
    omega: f64,
    max_iterations: usize,
) -> TrussResult<SolveReport> {
    check_system(a, x, b)?;
    warn_on_relaxation(omega);
    let n = a.nrows();

    let mut iterations = 0;
    let mut converged = false;
    while iterations < max_iterations {
        iterations += 1;
        let update_norm = relaxation_sweep(a, x, b, omega, 0..n).sqrt();
        debug!("SOR iteration {:>5}: |dx| = {:.5e}", iterations, update_norm);
        if update_norm <= tolerance {
            converged = true;
            break;
        }
    }

    Ok(SolveReport::new(iterations, converged))
}
