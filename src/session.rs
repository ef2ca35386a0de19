//! Stateful solver session: tolerances plus the active vector field.
//!
//! A [`SolverSession`] is an ordinary caller-owned value, so each caller gets
//! its own configuration and Rust's borrow rules rule out concurrent misuse.
//! The session never owns the field; it holds a plain borrow, and the caller
//! keeps the field alive for the duration of any solve.

use crate::error::{SolverError, SolverResult};
use crate::field::VectorField;
use crate::solvers::{self, RootFindResult, SolverConfig};

/// A root-finding session.
///
/// Holds the tolerances and a non-owning reference to the active vector
/// field. At most one field is active at a time; installing a new one
/// replaces the previous reference.
///
/// # Example
///
/// ```rust
/// use multiroot::field::FnField;
/// use multiroot::session::SolverSession;
/// use nalgebra::DVector;
///
/// let field = FnField::new(|x: &DVector<f64>| x.map(|v| v * v - 2.0));
///
/// let mut session = SolverSession::new();
/// session.set_f_tolerance(1e-10).unwrap();
/// assert!(session.set_vector_field(Some(&field)));
///
/// let result = session.find_roots(&[1.0], 50).unwrap();
/// assert!(result.status.is_converged());
/// assert!((result.point[0] - 2.0_f64.sqrt()).abs() < 1e-8);
/// ```
#[derive(Default)]
pub struct SolverSession<'f> {
    config: SolverConfig,
    field: Option<&'f dyn VectorField>,
}

impl<'f> SolverSession<'f> {
    /// Creates a session with default tolerances and no active field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the termination threshold on the residual norm ‖F(x)‖.
    ///
    /// Takes effect on the next solve. Negative values are rejected.
    pub fn set_f_tolerance(&mut self, tolf: f64) -> SolverResult<()> {
        if tolf < 0.0 {
            return Err(SolverError::InvalidTolerance { value: tolf });
        }
        self.config.f_tolerance = tolf;
        Ok(())
    }

    /// Sets the termination threshold on the step norm ‖Δx‖.
    ///
    /// Takes effect on the next solve. Negative values are rejected.
    pub fn set_x_tolerance(&mut self, tolx: f64) -> SolverResult<()> {
        if tolx < 0.0 {
            return Err(SolverError::InvalidTolerance { value: tolx });
        }
        self.config.x_tolerance = tolx;
        Ok(())
    }

    /// Installs `field` as the active vector field.
    ///
    /// Returns `false` and leaves the session unchanged when `field` is
    /// `None`; otherwise replaces any previously active reference and returns
    /// `true`. The old field needs no cleanup since it was never owned.
    pub fn set_vector_field(&mut self, field: Option<&'f dyn VectorField>) -> bool {
        match field {
            Some(f) => {
                self.field = Some(f);
                true
            }
            None => false,
        }
    }

    /// Performs unconstrained root finding from `start_values`.
    ///
    /// Fails with [`SolverError::NoVectorField`] when no field is installed;
    /// otherwise delegates to [`solvers::solve`] with the session's current
    /// tolerances.
    pub fn find_roots(
        &self,
        start_values: &[f64],
        max_iterations: u32,
    ) -> SolverResult<RootFindResult> {
        let field = self.field.ok_or(SolverError::NoVectorField)?;
        solvers::solve(field, start_values, &self.config, max_iterations)
    }

    /// Performs root finding restricted to the box `[lower, upper]`.
    ///
    /// Same precondition as [`SolverSession::find_roots`]; delegates to
    /// [`solvers::solve_bounded`].
    pub fn find_roots_bounded(
        &self,
        start_values: &[f64],
        lower: &[f64],
        upper: &[f64],
        max_iterations: u32,
    ) -> SolverResult<RootFindResult> {
        let field = self.field.ok_or(SolverError::NoVectorField)?;
        solvers::solve_bounded(field, start_values, lower, upper, &self.config, max_iterations)
    }

    /// Releases the active-field reference.
    ///
    /// Tolerances survive; subsequent `find_roots*` calls fail with
    /// [`SolverError::NoVectorField`] until a field is installed again.
    /// Idempotent: calling with no active field is a no-op.
    pub fn destroy(&mut self) {
        self.field = None;
    }

    /// The session's current configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Whether a vector field is currently installed.
    #[must_use]
    pub fn has_field(&self) -> bool {
        self.field.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FnField;
    use crate::solvers::RootStatus;
    use approx::assert_relative_eq;
    use nalgebra::DVector;

    fn shifted_identity() -> FnField<impl Fn(&DVector<f64>) -> DVector<f64>> {
        FnField::new(|x: &DVector<f64>| x.map(|v| v - 10.0))
    }

    #[test]
    fn test_solve_requires_field() {
        let session = SolverSession::new();

        let result = session.find_roots(&[1.0], 10);

        assert!(matches!(result, Err(SolverError::NoVectorField)));
    }

    #[test]
    fn test_set_vector_field_none_rejected() {
        let field = shifted_identity();
        let mut session = SolverSession::new();

        assert!(!session.set_vector_field(None));
        assert!(!session.has_field());

        assert!(session.set_vector_field(Some(&field)));
        assert!(session.has_field());

        // Rejecting None leaves the installed field in place
        assert!(!session.set_vector_field(None));
        assert!(session.has_field());
    }

    #[test]
    fn test_find_roots_via_session() {
        let field = shifted_identity();
        let mut session = SolverSession::new();
        session.set_vector_field(Some(&field));

        let result = session.find_roots(&[0.0], 50).unwrap();

        assert!(result.status.is_converged());
        assert_relative_eq!(result.point[0], 10.0, epsilon = 1e-8);
    }

    #[test]
    fn test_find_roots_bounded_via_session() {
        let field = shifted_identity();
        let mut session = SolverSession::new();
        session.set_vector_field(Some(&field));

        let result = session
            .find_roots_bounded(&[3.0], &[0.0], &[5.0], 50)
            .unwrap();

        // Root at 10 is infeasible: the iterate pins to the upper bound
        assert!(matches!(
            result.status,
            RootStatus::ConvergedX | RootStatus::MaxIterations
        ));
        assert_relative_eq!(result.point[0], 5.0, epsilon = 1e-8);
    }

    #[test]
    fn test_negative_tolerances_rejected() {
        let mut session = SolverSession::new();

        assert!(session.set_f_tolerance(-1.0).is_err());
        assert!(session.set_x_tolerance(-1e-30).is_err());
        assert!(session.set_f_tolerance(0.0).is_ok());
        assert!(session.set_x_tolerance(1e-12).is_ok());
    }

    #[test]
    fn test_destroy_idempotent() {
        let field = shifted_identity();
        let mut session = SolverSession::new();

        // Destroy with no field ever set is a no-op
        session.destroy();
        session.destroy();

        session.set_vector_field(Some(&field));
        session.set_x_tolerance(1e-3).unwrap();
        session.destroy();
        session.destroy();

        assert!(!session.has_field());
        assert!(matches!(
            session.find_roots(&[1.0], 10),
            Err(SolverError::NoVectorField)
        ));

        // Tolerances survive destroy
        assert!((session.config().x_tolerance - 1e-3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_replacing_field() {
        let first = shifted_identity();
        let second = FnField::new(|x: &DVector<f64>| x.map(|v| v + 1.0));

        let mut session = SolverSession::new();
        session.set_vector_field(Some(&first));
        session.set_vector_field(Some(&second));

        let result = session.find_roots(&[0.0], 50).unwrap();

        assert!(result.status.is_converged());
        assert_relative_eq!(result.point[0], -1.0, epsilon = 1e-8);
    }
}
