//! Damped Newton iteration for systems of nonlinear equations.
//!
//! Each iteration evaluates the field, solves `J·Δx = -F(x)` for the Newton
//! step, and backtracks (halving the step) until the residual norm strictly
//! decreases. With box constraints the accepted candidate is clamped into the
//! box after backtracking; the projection is deliberately a plain clamp, not a
//! constrained Newton step.

use log::{debug, trace};
use nalgebra::DVector;

use crate::error::{SolverError, SolverResult};
use crate::field::VectorField;
use crate::linear_algebra::solve_linear_system;
use crate::solvers::{RootFindResult, RootStatus, SolverConfig};

/// Maximum number of step halvings tried during backtracking.
const MAX_BACKTRACK_STEPS: u32 = 20;

/// Residual norm above which sustained growth counts as divergence.
const DIVERGENCE_CEILING: f64 = 1e8;

/// Consecutive residual-growth iterations that trigger the divergence check.
const MAX_RESIDUAL_GROWTH: u32 = 3;

/// Finds a root of `field` starting from `x0`, unconstrained.
///
/// # Arguments
///
/// * `field` - The vector field F whose root is sought
/// * `x0` - Starting point, length n ≥ 1
/// * `config` - Convergence tolerances
/// * `max_iterations` - Iteration budget, at least 1
///
/// # Returns
///
/// A [`RootFindResult`] describing how the iteration terminated. Algorithmic
/// outcomes (divergence, degeneracy, budget exhaustion, numerical failure)
/// are statuses, not errors; only malformed inputs produce an `Err`.
///
/// # Example
///
/// ```rust
/// use multiroot::field::FnField;
/// use multiroot::solvers::{solve, SolverConfig};
/// use nalgebra::DVector;
///
/// // F(x) = x^3 - 8, root at x = 2
/// let field = FnField::new(|x: &DVector<f64>| x.map(|v| v * v * v - 8.0));
///
/// let result = solve(&field, &[3.0], &SolverConfig::default(), 50).unwrap();
/// assert!(result.status.is_converged());
/// assert!((result.point[0] - 2.0).abs() < 1e-6);
/// ```
pub fn solve<F>(
    field: &F,
    x0: &[f64],
    config: &SolverConfig,
    max_iterations: u32,
) -> SolverResult<RootFindResult>
where
    F: VectorField + ?Sized,
{
    solve_inner(field, x0, None, config, max_iterations)
}

/// Finds a root of `field` within the box `[lower, upper]`.
///
/// Identical to [`solve`] except that bounds are mandatory: candidates are
/// clamped into the box after each backtracking step, and a starting point
/// outside the box is clamped in before iterating (a documented policy, not
/// an error). Bounds with `lower[i] > upper[i]` are rejected before any
/// iteration.
pub fn solve_bounded<F>(
    field: &F,
    x0: &[f64],
    lower: &[f64],
    upper: &[f64],
    config: &SolverConfig,
    max_iterations: u32,
) -> SolverResult<RootFindResult>
where
    F: VectorField + ?Sized,
{
    solve_inner(field, x0, Some((lower, upper)), config, max_iterations)
}

fn solve_inner<F>(
    field: &F,
    x0: &[f64],
    bounds: Option<(&[f64], &[f64])>,
    config: &SolverConfig,
    max_iterations: u32,
) -> SolverResult<RootFindResult>
where
    F: VectorField + ?Sized,
{
    let n = x0.len();
    if n == 0 {
        return Err(SolverError::invalid_input("Starting point must not be empty"));
    }
    if max_iterations == 0 {
        return Err(SolverError::invalid_input("max_iterations must be at least 1"));
    }
    if config.f_tolerance < 0.0 {
        return Err(SolverError::InvalidTolerance {
            value: config.f_tolerance,
        });
    }
    if config.x_tolerance < 0.0 {
        return Err(SolverError::InvalidTolerance {
            value: config.x_tolerance,
        });
    }
    if let Some((lower, upper)) = bounds {
        if lower.len() != n {
            return Err(SolverError::dimension_mismatch(n, lower.len()));
        }
        if upper.len() != n {
            return Err(SolverError::dimension_mismatch(n, upper.len()));
        }
        for i in 0..n {
            if lower[i] > upper[i] {
                return Err(SolverError::InvalidBounds {
                    index: i,
                    lower: lower[i],
                    upper: upper[i],
                });
            }
        }
    }

    let mut x = DVector::from_column_slice(x0);
    if let Some((lower, upper)) = bounds {
        clamp_into_box(&mut x, lower, upper);
    }

    let mut prev_residual = f64::INFINITY;
    let mut growth_streak = 0u32;

    for iteration in 0..max_iterations {
        let f = field.evaluate(&x);
        if f.len() != n {
            return Err(SolverError::dimension_mismatch(n, f.len()));
        }
        if !is_finite(&f) {
            debug!("non-finite residual at iteration {iteration}");
            return Ok(finished(RootStatus::NumericalError, x, iteration));
        }

        let residual = f.norm();
        trace!("iteration {iteration}: residual = {residual:.6e}");

        // Residual check first: ConvergedF wins when both tolerances would fire.
        if residual < config.f_tolerance {
            debug!("converged in f after {iteration} iterations");
            return Ok(finished(RootStatus::ConvergedF, x, iteration));
        }

        if residual > prev_residual {
            growth_streak += 1;
        } else {
            growth_streak = 0;
        }
        if growth_streak >= MAX_RESIDUAL_GROWTH && residual > DIVERGENCE_CEILING {
            debug!("diverged: residual {residual:.3e} grew {growth_streak} iterations in a row");
            return Ok(finished(RootStatus::Diverged, x, iteration));
        }
        prev_residual = residual;

        let jacobian = field.jacobian(&x);
        if jacobian.nrows() != n || jacobian.ncols() != n {
            return Err(SolverError::dimension_mismatch(n * n, jacobian.len()));
        }
        if !jacobian.iter().all(|v| v.is_finite()) {
            return Ok(finished(RootStatus::NumericalError, x, iteration));
        }

        let step = match solve_linear_system(&jacobian, &(-&f)) {
            Ok(step) => step,
            Err(SolverError::SingularMatrix) => {
                debug!("degenerate Jacobian at iteration {iteration}");
                return Ok(finished(RootStatus::Degenerate, x, iteration));
            }
            Err(err) => return Err(err),
        };
        if !is_finite(&step) {
            return Ok(finished(RootStatus::NumericalError, x, iteration));
        }

        // Backtracking: halve the step until the residual norm strictly drops.
        let mut scale = 1.0;
        let mut accepted = None;
        for _ in 0..=MAX_BACKTRACK_STEPS {
            let trial = &x + &step * scale;
            let f_trial = field.evaluate(&trial);
            if !is_finite(&f_trial) {
                return Ok(finished(RootStatus::NumericalError, x, iteration));
            }
            if f_trial.norm() < residual {
                accepted = Some(trial);
                break;
            }
            scale *= 0.5;
        }

        let Some(mut next) = accepted else {
            debug!("diverged: no damped step reduced the residual at iteration {iteration}");
            return Ok(finished(RootStatus::Diverged, x, iteration));
        };

        if let Some((lower, upper)) = bounds {
            clamp_into_box(&mut next, lower, upper);
        }

        // Step check on the applied step, after any clamping.
        let applied = (&next - &x).norm();
        if applied < config.x_tolerance {
            debug!("converged in x after {} iterations", iteration + 1);
            return Ok(finished(RootStatus::ConvergedX, next, iteration + 1));
        }

        x = next;
    }

    debug!("iteration budget of {max_iterations} exhausted");
    Ok(finished(RootStatus::MaxIterations, x, max_iterations))
}

fn finished(status: RootStatus, point: DVector<f64>, iterations: u32) -> RootFindResult {
    RootFindResult {
        status,
        point,
        iterations,
    }
}

fn is_finite(v: &DVector<f64>) -> bool {
    v.iter().all(|c| c.is_finite())
}

fn clamp_into_box(x: &mut DVector<f64>, lower: &[f64], upper: &[f64]) {
    for i in 0..x.len() {
        x[i] = x[i].clamp(lower[i], upper[i]);
    }
}
