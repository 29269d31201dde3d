//! Symmetric successive over-relaxation
//!
//! One iteration is a forward SOR sweep followed by a backward sweep, which
//! makes the iteration operator symmetric for a symmetric `A`.

use log::debug;

use super::{check_system, relaxation_sweep, warn_on_relaxation, SolveReport};
use crate::error::TrussResult;
use crate::math::{Mat, Vector};

pub const MAX_ITERATIONS: usize = 1000;

/// Solve `A x = b` by SSOR with the default iteration cap
pub fn solve(
    a: &Mat,
    x: &mut Vector,
    b: &Vector,
    tolerance: f64,
    omega: f64,
) -> TrussResult<SolveReport> {
    solve_with_limit(a, x, b, tolerance, omega, MAX_ITERATIONS)
}

/// Solve `A x = b` by SSOR
///
/// The convergence norm covers the updates of both half sweeps.
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
        let forward = relaxation_sweep(a, x, b, omega, 0..n);
        let backward = relaxation_sweep(a, x, b, omega, (0..n).rev());
        let update_norm = (forward + backward).sqrt();
        debug!("SSOR iteration {:>5}: |dx| = {:.5e}", iterations, update_norm);
        if update_norm <= tolerance {
            converged = true;
            break;
        }
    }

    Ok(SolveReport::new(iterations, converged))
}
