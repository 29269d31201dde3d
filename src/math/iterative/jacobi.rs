//! Jacobi iteration with fixed tolerances

use log::debug;

use super::{check_system, SolveReport};
use crate::error::TrussResult;
use crate::math::{Mat, Vector};

/// Floor for `x_i^2` in the relative norms
pub const MIN_VALUE: f64 = 1.0e-12;
/// Convergence threshold on the L2 norm of the update
pub const UPDATE_ABSOLUTE_TOLERANCE: f64 = 1.0e-6;
pub const MAX_ITERATIONS: usize = 1000;

/// Convergence diagnostics of a single sweep
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SweepNorms {
    pub residual_absolute: f64,
    pub residual_relative: f64,
    pub update_absolute: f64,
    pub update_relative: f64,
}

impl SweepNorms {
    fn accumulate(&mut self, residual: f64, update: f64, x: f64) {
        let scale = (x * x).max(MIN_VALUE);
        self.residual_absolute += residual * residual;
        self.residual_relative += residual * residual / scale;
        self.update_absolute += update * update;
        self.update_relative += update * update / scale;
    }

    fn finish(self) -> Self {
        Self {
            residual_absolute: self.residual_absolute.sqrt(),
            residual_relative: self.residual_relative.sqrt(),
            update_absolute: self.update_absolute.sqrt(),
            update_relative: self.update_relative.sqrt(),
        }
    }
}

/// Solve `A x = b` by Jacobi iteration
///
/// Every row of a sweep is computed from the previous full iterate. Stops when
/// the absolute update norm drops to `UPDATE_ABSOLUTE_TOLERANCE` or after
/// `MAX_ITERATIONS` sweeps.
pub fn solve(a: &Mat, x: &mut Vector, b: &Vector) -> TrussResult<SolveReport> {
    check_system(a, x, b)?;
    let n = a.nrows();
    let mut x_old = x.clone();

    debug!(
        "{:>10}{:>15}{:>15}{:>15}{:>15}",
        "Iteration", "|R|", "|R| / |x|", "|dx|", "|dx| / |x|"
    );

    let mut iterations = 0;
    let mut converged = false;
    while iterations < MAX_ITERATIONS {
        iterations += 1;

        let mut norms = SweepNorms::default();
        for i in 0..n {
            let mut residual = b[i];
            for j in 0..n {
                residual -= a[(i, j)] * x_old[j];
            }
            let update = residual / a[(i, i)];
            x[i] = x_old[i] + update;
            norms.accumulate(residual, update, x[i]);
        }
        let norms = norms.finish();

        debug!(
            "{:>10}{:>15.5e}{:>15.5e}{:>15.5e}{:>15.5e}",
            iterations,
            norms.residual_absolute,
            norms.residual_relative,
            norms.update_absolute,
            norms.update_relative
        );

        if norms.update_absolute <= UPDATE_ABSOLUTE_TOLERANCE {
            converged = true;
            break;
        }
        x_old.copy_from(x);
    }

    Ok(SolveReport::new(iterations, converged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrussError;
    use crate::math::iterative::test_system::{pentadiagonal, SOLUTION};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_solve_pentadiagonal() {
        let (a, b) = pentadiagonal();
        let mut x = Vector::zeros(5);
        let report = solve(&a, &mut x, &b).unwrap();
        assert_eq!(report.iterations, 18);
        assert!(report.converged);
        for i in 0..5 {
            assert_abs_diff_eq!(x[i], SOLUTION[i], epsilon = 1e-4);
        }
    }

    #[test]
    fn test_exact_initial_guess_converges_immediately() {
        let a = Mat::from_diagonal_element(3, 3, 2.0);
        let b = Vector::from_vec(vec![2.0, 4.0, 6.0]);
        let mut x = Vector::from_vec(vec![1.0, 2.0, 3.0]);
        let report = solve(&a, &mut x, &b).unwrap();
        assert_eq!(report, SolveReport { iterations: 1, converged: true });
        assert_eq!(x, Vector::from_vec(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_divergent_system_hits_cap() {
        // Not diagonally dominant: Jacobi diverges
        let a = Mat::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 1.0]);
        let b = Vector::from_vec(vec![1.0, 1.0]);
        let mut x = Vector::zeros(2);
        let report = solve(&a, &mut x, &b).unwrap();
        assert_eq!(report.iterations, MAX_ITERATIONS);
        assert!(!report.converged);
    }

    #[test]
    fn test_zero_pivot_is_rejected() {
        let a = Mat::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 1.0]);
        let b = Vector::from_vec(vec![1.0, 1.0]);
        let mut x = Vector::zeros(2);
        assert!(matches!(solve(&a, &mut x, &b), Err(TrussError::ZeroPivot(0))));
    }
}
