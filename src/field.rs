//! The vector field abstraction: the function F whose root is sought.
//!
//! A vector field maps ℝⁿ → ℝⁿ. The solver only requires [`VectorField::evaluate`];
//! [`VectorField::jacobian`] has a provided default that approximates the
//! Jacobian by forward finite differences, so evaluate-only fields work out of
//! the box at the cost of n extra evaluations per iteration.

use nalgebra::{DMatrix, DVector};

/// A vector-valued function F: ℝⁿ → ℝⁿ.
///
/// The dimension n is implied by the length of the vectors the field consumes
/// and produces, and must stay consistent across calls within a single solve.
///
/// # Example
///
/// ```rust
/// use multiroot::field::VectorField;
/// use nalgebra::{DMatrix, DVector};
///
/// // F(x, y) = (x^2 - y, y - 3) with an analytic Jacobian.
/// struct Parabola;
///
/// impl VectorField for Parabola {
///     fn evaluate(&self, x: &DVector<f64>) -> DVector<f64> {
///         DVector::from_vec(vec![x[0] * x[0] - x[1], x[1] - 3.0])
///     }
///
///     fn jacobian(&self, x: &DVector<f64>) -> DMatrix<f64> {
///         DMatrix::from_row_slice(2, 2, &[2.0 * x[0], -1.0, 0.0, 1.0])
///     }
/// }
/// ```
pub trait VectorField {
    /// Evaluates F at `x`.
    fn evaluate(&self, x: &DVector<f64>) -> DVector<f64>;

    /// The Jacobian of F at `x`.
    ///
    /// Override this when an analytic Jacobian is available; the default
    /// implementation falls back to [`finite_difference_jacobian`].
    fn jacobian(&self, x: &DVector<f64>) -> DMatrix<f64> {
        finite_difference_jacobian(|v| self.evaluate(v), x)
    }
}

/// Approximates the Jacobian of `f` at `x` by forward finite differences.
///
/// Each coordinate is perturbed by a relative step
/// `h_i = sqrt(machine_epsilon) * max(1, |x_i|)`, costing one evaluation per
/// coordinate on top of the base evaluation.
///
/// # Panics
///
/// Panics when `f` returns outputs of different lengths across calls.
pub fn finite_difference_jacobian<F>(f: F, x: &DVector<f64>) -> DMatrix<f64>
where
    F: Fn(&DVector<f64>) -> DVector<f64>,
{
    let n = x.len();
    let f0 = f(x);
    let m = f0.len();
    let sqrt_eps = f64::EPSILON.sqrt();

    let mut jac = DMatrix::zeros(m, n);
    let mut xh = x.clone();

    for j in 0..n {
        let h = sqrt_eps * x[j].abs().max(1.0);
        xh[j] = x[j] + h;
        let fj = f(&xh);
        xh[j] = x[j];

        assert_eq!(
            fj.len(),
            m,
            "vector field output length changed between evaluations: {} then {}",
            m,
            fj.len()
        );

        for i in 0..m {
            jac[(i, j)] = (fj[i] - f0[i]) / h;
        }
    }

    jac
}

/// Adapts a closure into an evaluate-only vector field.
///
/// The Jacobian comes from the finite-difference default.
///
/// # Example
///
/// ```rust
/// use multiroot::field::{FnField, VectorField};
/// use nalgebra::DVector;
///
/// let field = FnField::new(|x: &DVector<f64>| x.map(|v| v * v - 2.0));
/// let fx = field.evaluate(&DVector::from_vec(vec![2.0]));
/// assert_eq!(fx[0], 2.0);
/// ```
pub struct FnField<F> {
    f: F,
}

impl<F> FnField<F>
where
    F: Fn(&DVector<f64>) -> DVector<f64>,
{
    /// Wraps the closure `f`.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> VectorField for FnField<F>
where
    F: Fn(&DVector<f64>) -> DVector<f64>,
{
    fn evaluate(&self, x: &DVector<f64>) -> DVector<f64> {
        (self.f)(x)
    }
}

/// Pairs an evaluate closure with an analytic Jacobian closure.
pub struct FnFieldWithJacobian<F, J> {
    f: F,
    jac: J,
}

impl<F, J> FnFieldWithJacobian<F, J>
where
    F: Fn(&DVector<f64>) -> DVector<f64>,
    J: Fn(&DVector<f64>) -> DMatrix<f64>,
{
    /// Wraps the closures `f` and `jac`.
    pub fn new(f: F, jac: J) -> Self {
        Self { f, jac }
    }
}

impl<F, J> VectorField for FnFieldWithJacobian<F, J>
where
    F: Fn(&DVector<f64>) -> DVector<f64>,
    J: Fn(&DVector<f64>) -> DMatrix<f64>,
{
    fn evaluate(&self, x: &DVector<f64>) -> DVector<f64> {
        (self.f)(x)
    }

    fn jacobian(&self, x: &DVector<f64>) -> DMatrix<f64> {
        (self.jac)(x)
    }
}
