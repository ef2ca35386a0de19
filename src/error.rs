//! Error types for solver configuration and input validation.
//!
//! Only programmer errors surface here: a missing vector field, mismatched
//! dimensions, bad bounds, negative tolerances. Numerical trouble encountered
//! mid-solve (NaN, divergence, singular Jacobian) is reported through
//! [`RootStatus`](crate::solvers::RootStatus) in the result instead, since it
//! can legitimately occur for a well-formed request.

use thiserror::Error;

/// A specialized Result type for solver operations.
pub type SolverResult<T> = Result<T, SolverError>;

/// Errors that can occur when configuring or invoking the solver.
#[derive(Error, Debug, Clone)]
pub enum SolverError {
    /// A solve was requested before any vector field was installed.
    #[error("No vector field set: install one with set_vector_field before solving")]
    NoVectorField,

    /// Vector or matrix dimensions are inconsistent.
    #[error("Dimension mismatch: expected length {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected number of components.
        expected: usize,
        /// Actual number of components.
        actual: usize,
    },

    /// A box constraint has its lower bound above its upper bound.
    #[error("Invalid bounds at component {index}: lower {lower} > upper {upper}")]
    InvalidBounds {
        /// Offending component index.
        index: usize,
        /// Lower bound at that component.
        lower: f64,
        /// Upper bound at that component.
        upper: f64,
    },

    /// A tolerance was set to a negative value.
    #[error("Invalid tolerance: {value} is negative")]
    InvalidTolerance {
        /// The rejected value.
        value: f64,
    },

    /// Matrix is singular (not invertible) within the pivot threshold.
    #[error("Singular matrix: cannot solve linear system")]
    SingularMatrix,

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl SolverError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates a dimension mismatch error.
    #[must_use]
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }
}
