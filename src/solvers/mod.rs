//! Root-finding for systems of nonlinear equations.
//!
//! Given a vector field F: ℝⁿ → ℝⁿ, [`solve`] searches for x with F(x) ≈ 0 by
//! damped Newton iteration; [`solve_bounded`] is the same search restricted to
//! a box by component-wise clamping.
//!
//! Termination is reported through [`RootStatus`], never through an error:
//! divergence, a degenerate Jacobian, an exhausted budget, and numerical
//! failure are all ordinary outcomes of a well-formed request. Errors are
//! reserved for caller mistakes (bad bounds, mismatched dimensions, negative
//! tolerances).
//!
//! # Example
//!
//! ```rust
//! use multiroot::field::FnField;
//! use multiroot::solvers::{solve, SolverConfig};
//! use nalgebra::DVector;
//!
//! // F(x, y) = (x^2 + y^2 - 4, x - y): roots at (±√2, ±√2)
//! let field = FnField::new(|x: &DVector<f64>| {
//!     DVector::from_vec(vec![x[0] * x[0] + x[1] * x[1] - 4.0, x[0] - x[1]])
//! });
//!
//! let result = solve(&field, &[1.0, 2.0], &SolverConfig::default(), 50).unwrap();
//! assert!(result.status.is_converged());
//! assert!((result.point[0] - 2.0_f64.sqrt()).abs() < 1e-6);
//! ```

mod newton;

pub use newton::{solve, solve_bounded};

use nalgebra::DVector;

use crate::error::{SolverError, SolverResult};

/// Default tolerance on the residual norm ‖F(x)‖.
pub const DEFAULT_F_TOLERANCE: f64 = 1e-8;

/// Default tolerance on the step norm ‖Δx‖.
pub const DEFAULT_X_TOLERANCE: f64 = 1e-8;

/// Configuration for the root-finding iteration.
///
/// Read once at the start of each solve; changing a tolerance mid-solve has
/// no effect on a run already in flight.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Convergence threshold on the residual norm.
    pub f_tolerance: f64,
    /// Convergence threshold on the step norm.
    pub x_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            f_tolerance: DEFAULT_F_TOLERANCE,
            x_tolerance: DEFAULT_X_TOLERANCE,
        }
    }
}

impl SolverConfig {
    /// Creates a configuration, rejecting negative tolerances.
    pub fn new(f_tolerance: f64, x_tolerance: f64) -> SolverResult<Self> {
        if f_tolerance < 0.0 {
            return Err(SolverError::InvalidTolerance { value: f_tolerance });
        }
        if x_tolerance < 0.0 {
            return Err(SolverError::InvalidTolerance { value: x_tolerance });
        }
        Ok(Self {
            f_tolerance,
            x_tolerance,
        })
    }
}

/// Termination status of a root-finding run.
///
/// The discriminants are a fixed public contract (0–5) and survive round-trips
/// through [`RootStatus::code`] / [`RootStatus::from_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum RootStatus {
    /// Step size fell below the x tolerance.
    ConvergedX = 0,
    /// Residual norm fell below the f tolerance.
    ConvergedF = 1,
    /// Residual norm grew without bound, or no damped step reduced it.
    Diverged = 2,
    /// Jacobian singular or ill-conditioned: a local extremum or saddle point.
    Degenerate = 3,
    /// Iteration budget exhausted without meeting any other criterion.
    MaxIterations = 4,
    /// NaN or Inf encountered in an evaluation or the linear solve.
    NumericalError = 5,
}

impl RootStatus {
    /// Returns the integer status code.
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Looks up the status for an integer code.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::ConvergedX),
            1 => Some(Self::ConvergedF),
            2 => Some(Self::Diverged),
            3 => Some(Self::Degenerate),
            4 => Some(Self::MaxIterations),
            5 => Some(Self::NumericalError),
            _ => None,
        }
    }

    /// Whether the run ended at a root within tolerance.
    #[must_use]
    pub fn is_converged(self) -> bool {
        matches!(self, Self::ConvergedX | Self::ConvergedF)
    }
}

/// Result of a root-finding run.
#[derive(Debug, Clone)]
pub struct RootFindResult {
    /// How the iteration terminated.
    pub status: RootStatus,
    /// The final point, whether or not it is a root.
    pub point: DVector<f64>,
    /// Number of iterations consumed.
    pub iterations: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_fixed() {
        assert_eq!(RootStatus::ConvergedX.code(), 0);
        assert_eq!(RootStatus::ConvergedF.code(), 1);
        assert_eq!(RootStatus::Diverged.code(), 2);
        assert_eq!(RootStatus::Degenerate.code(), 3);
        assert_eq!(RootStatus::MaxIterations.code(), 4);
        assert_eq!(RootStatus::NumericalError.code(), 5);
    }

    #[test]
    fn test_status_code_round_trip() {
        for code in 0..6 {
            let status = RootStatus::from_code(code).unwrap();
            assert_eq!(status.code(), code);
        }
        assert!(RootStatus::from_code(6).is_none());
        assert!(RootStatus::from_code(-1).is_none());
    }

    #[test]
    fn test_is_converged() {
        assert!(RootStatus::ConvergedX.is_converged());
        assert!(RootStatus::ConvergedF.is_converged());
        assert!(!RootStatus::Diverged.is_converged());
        assert!(!RootStatus::MaxIterations.is_converged());
    }

    #[test]
    fn test_config_validation() {
        assert!(SolverConfig::new(1e-6, 1e-6).is_ok());
        assert!(SolverConfig::new(0.0, 0.0).is_ok());
        assert!(SolverConfig::new(-1e-6, 1e-6).is_err());
        assert!(SolverConfig::new(1e-6, -1e-6).is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config = SolverConfig::default();
        assert!((config.f_tolerance - DEFAULT_F_TOLERANCE).abs() < f64::EPSILON);
        assert!((config.x_tolerance - DEFAULT_X_TOLERANCE).abs() < f64::EPSILON);
    }
}
