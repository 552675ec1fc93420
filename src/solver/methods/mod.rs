//! Cramer's Rule strategies
//!
//! This module contains the concrete implementations of the
//! [`Solver`](crate::solver::Solver) trait.
//!
//! - **[`SequentialSolver`]**: one control flow, unknowns computed in turn
//! - **[`ConcurrentSolver`]**: one worker per unknown, results merged at a barrier
//!
//! Both compute `det(A)` once, report a zero determinant as
//! [`SolveError::NoSolution`](crate::solver::SolveError::NoSolution), and
//! evaluate every determinant on a private copy of `A`.
//!
//! # Cost
//!
//! n + 1 determinants of O(n³) each. The concurrent strategy spreads the n
//! substituted determinants across workers; the main determinant is always
//! computed by the caller's thread.

pub mod concurrent;
pub mod sequential;

pub use concurrent::ConcurrentSolver;
pub use sequential::SequentialSolver;
