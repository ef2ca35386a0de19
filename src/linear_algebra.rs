//! Dense linear algebra for the Newton step.
//!
//! A single entry point, [`solve_linear_system`], implemented as in-place LU
//! decomposition with partial pivoting. Pivoting matters here: Newton
//! Jacobians routinely carry zeros on the diagonal even when the matrix is
//! perfectly well conditioned.

use nalgebra::{DMatrix, DVector};

use crate::error::{SolverError, SolverResult};

/// Relative pivot threshold below which the matrix is treated as singular.
///
/// The threshold is scaled by the largest absolute entry of the matrix, so
/// rank detection is invariant under uniform scaling of the system.
const PIVOT_THRESHOLD: f64 = 1e-12;

/// Solves the linear system `A x = b` by LU decomposition with partial pivoting.
///
/// # Arguments
///
/// * `a` - Square coefficient matrix
/// * `b` - Right-hand side vector of matching length
///
/// # Returns
///
/// The solution vector, or [`SolverError::SingularMatrix`] when a pivot falls
/// below the usable-rank threshold.
pub fn solve_linear_system(a: &DMatrix<f64>, b: &DVector<f64>) -> SolverResult<DVector<f64>> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(SolverError::invalid_input(
            "Matrix must be square for linear solve",
        ));
    }
    if b.len() != n {
        return Err(SolverError::dimension_mismatch(n, b.len()));
    }
    if n == 0 {
        return Ok(DVector::zeros(0));
    }

    let scale = a.amax();
    if scale == 0.0 {
        return Err(SolverError::SingularMatrix);
    }
    let threshold = PIVOT_THRESHOLD * scale;

    let mut lu = a.clone();
    let mut x = b.clone();

    // Forward elimination with row pivoting
    for k in 0..n {
        let mut pivot_row = k;
        for i in k + 1..n {
            if lu[(i, k)].abs() > lu[(pivot_row, k)].abs() {
                pivot_row = i;
            }
        }

        if lu[(pivot_row, k)].abs() < threshold {
            return Err(SolverError::SingularMatrix);
        }

        if pivot_row != k {
            lu.swap_rows(k, pivot_row);
            x.swap_rows(k, pivot_row);
        }

        for i in k + 1..n {
            let factor = lu[(i, k)] / lu[(k, k)];
            lu[(i, k)] = factor;
            for j in k + 1..n {
                lu[(i, j)] -= factor * lu[(k, j)];
            }
            x[i] -= factor * x[k];
        }
    }

    // Back substitution
    for i in (0..n).rev() {
        let mut sum = x[i];
        for j in i + 1..n {
            sum -= lu[(i, j)] * x[j];
        }
        x[i] = sum / lu[(i, i)];
    }

    Ok(x)
}
