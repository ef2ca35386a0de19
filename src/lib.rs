//! # Multiroot
//!
//! Multidimensional nonlinear root finding: given a vector field F: ℝⁿ → ℝⁿ,
//! find x with F(x) ≈ 0 by damped Newton iteration, optionally restricted to
//! a box by component-wise clamping.
//!
//! This crate provides:
//!
//! - **Fields**: the [`field::VectorField`] trait with a finite-difference
//!   Jacobian default, plus closure adapters
//! - **Solvers**: the damped Newton core ([`solvers::solve`],
//!   [`solvers::solve_bounded`]) and its status taxonomy
//! - **Sessions**: [`session::SolverSession`], a caller-owned handle bundling
//!   tolerances with the active field
//! - **Linear Algebra**: partial-pivot LU solve with usable-rank detection
//!
//! ## Design Philosophy
//!
//! - **Statuses, not panics**: divergence, degeneracy, and numerical failure
//!   are ordinary results of a well-formed request
//! - **Non-owning fields**: the session borrows the caller's field object
//! - **Deterministic budgets**: `max_iterations` is the only stopping budget;
//!   nothing is retried internally
//!
//! ## Example
//!
//! ```rust
//! use multiroot::prelude::*;
//! use nalgebra::DVector;
//!
//! // F(x, y) = (x + y - 3, x - y - 1): root at (2, 1)
//! let field = FnField::new(|x: &DVector<f64>| {
//!     DVector::from_vec(vec![x[0] + x[1] - 3.0, x[0] - x[1] - 1.0])
//! });
//!
//! let mut session = SolverSession::new();
//! session.set_vector_field(Some(&field));
//!
//! let result = session.find_roots(&[0.0, 0.0], 50).unwrap();
//! assert!(result.status.is_converged());
//! assert!((result.point[0] - 2.0).abs() < 1e-8);
//! assert!((result.point[1] - 1.0).abs() < 1e-8);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod field;
pub mod linear_algebra;
pub mod session;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{SolverError, SolverResult};
    pub use crate::field::{
        finite_difference_jacobian, FnField, FnFieldWithJacobian, VectorField,
    };
    pub use crate::session::SolverSession;
    pub use crate::solvers::{
        solve, solve_bounded, RootFindResult, RootStatus, SolverConfig, DEFAULT_F_TOLERANCE,
        DEFAULT_X_TOLERANCE,
    };
}

pub use error::{SolverError, SolverResult};
