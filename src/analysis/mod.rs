//! Solver selection and options

use serde::{Deserialize, Serialize};

/// Iterative solver used for the reduced system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    /// Jacobi iteration with its own fixed tolerances
    Jacobi,
    /// Successive over-relaxation
    #[default]
    Sor,
    /// Symmetric successive over-relaxation
    Ssor,
}

/// Options for solving an assembled model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Solver to run
    pub solver: SolverKind,
    /// Convergence tolerance on the L2 norm of a sweep's updates (SOR/SSOR)
    pub tolerance: f64,
    /// Relaxation factor omega (SOR/SSOR)
    pub relaxation: f64,
    /// Maximum number of iterations (SOR/SSOR)
    pub max_iterations: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            solver: SolverKind::Sor,
            tolerance: 1e-10,
            relaxation: 1.5,
            max_iterations: 1000,
        }
    }
}

impl AnalysisOptions {
    /// Create options for Jacobi iteration
    pub fn jacobi() -> Self {
        Self {
            solver: SolverKind::Jacobi,
            ..Self::default()
        }
    }

    /// Create options for SOR with relaxation factor `omega`
    pub fn sor(omega: f64) -> Self {
        Self {
            solver: SolverKind::Sor,
            relaxation: omega,
            ..Self::default()
        }
    }

    /// Create options for SSOR with relaxation factor `omega`
    pub fn ssor(omega: f64) -> Self {
        Self {
            solver: SolverKind::Ssor,
            relaxation: omega,
            ..Self::default()
        }
    }

    /// Set maximum iterations
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iterations = max_iter;
        self
    }

    /// Set convergence tolerance
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Load options from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> crate::error::TrussResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = AnalysisOptions::default();
        assert_eq!(options.solver, SolverKind::Sor);
        assert_eq!(options.tolerance, 1e-10);
        assert_eq!(options.relaxation, 1.5);
        assert_eq!(options.max_iterations, 1000);
    }

    #[test]
    fn test_builders() {
        let options = AnalysisOptions::ssor(1.2).with_tolerance(1e-12).with_max_iter(50);
        assert_eq!(options.solver, SolverKind::Ssor);
        assert_eq!(options.relaxation, 1.2);
        assert_eq!(options.tolerance, 1e-12);
        assert_eq!(options.max_iterations, 50);
        assert_eq!(AnalysisOptions::jacobi().solver, SolverKind::Jacobi);
    }

    #[test]
    fn test_from_json() {
        let options = AnalysisOptions::from_json(r#"{"solver": "ssor", "relaxation": 1.1}"#).unwrap();
        assert_eq!(options.solver, SolverKind::Ssor);
        assert_eq!(options.relaxation, 1.1);
        assert_eq!(options.tolerance, 1e-10);

        assert!(AnalysisOptions::from_json(r#"{"solver": "cholesky"}"#).is_err());
    }
}
