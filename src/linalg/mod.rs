//! Linear algebra building blocks
//!
//! - **`matrix`**: dense square [`Matrix`] storage (allocate, clone, replace column)
//! - **`determinant`**: the [`Determinant`] engine trait and its
//!   [`GaussianElimination`] implementation
//!
//! Both solvers consume these through plain function calls; neither owns a
//! matrix longer than one determinant evaluation.

pub mod determinant;
pub mod matrix;

pub use determinant::{determinant, Determinant, GaussianElimination, DEFAULT_PIVOT_TOLERANCE};
pub use matrix::{Matrix, MatrixError};
