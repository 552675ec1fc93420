//! cramer-rs: Cramer's Rule, sequential and concurrent
//!
//! Solves square linear systems `A·X = B` with Cramer's Rule,
//! `X[i] = det(A_i) / det(A)`, where `A_i` is `A` with column `i` replaced by
//! `B`. Two strategies share one determinant engine:
//!
//! - **Sequential**: the n numerator determinants, one after another
//! - **Concurrent**: one worker per unknown, each sending its value back over
//!   a channel to an aggregation barrier that waits for all n results
//!
//! A benchmark driver times both on seeded random systems and writes one CSV
//! row per matrix size.
//!
//! # Architecture
//!
//! 1. **Separation of algebra and dispatch**
//!    - The determinant engine computes `det(M)` (what to evaluate)
//!    - Solvers decide how the n+1 evaluations are scheduled
//!
//! 2. **Failures are values**
//!    - A singular system is `SolveError::NoSolution`, not a panic
//!    - A crashed or late worker is reported, never read as a zero
//!
//! # Quick Start
//!
//! ```rust
//! use cramer_rs::prelude::*;
//!
//! let system = LinearSystem::from_rows(
//!     &[vec![2.0, 1.0], vec![1.0, 3.0]],
//!     &[4.0, 7.0],
//! )?;
//!
//! let sequential = SequentialSolver::new().solve(&system)?;
//! let concurrent = ConcurrentSolver::default().solve(&system)?;
//!
//! assert!((sequential.values[0] - 1.0).abs() < 1e-12);
//! assert!((sequential.values[1] - 2.0).abs() < 1e-12);
//! assert_eq!(sequential.values, concurrent.values);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! - [`linalg`]: Matrix store and determinant engine
//! - [`solver`]: Sequential and concurrent Cramer solvers
//! - [`benchmark`]: Seeded systems, timing, records
//! - [`output`]: CSV export and charts (feature `plot`)

pub mod linalg;
pub mod solver;

pub mod benchmark;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use cramer_rs::prelude::*;
    //! ```
    pub use crate::benchmark::{BenchmarkConfig, BenchmarkRecord, BenchmarkRunner, Outcome};
    pub use crate::linalg::{Determinant, GaussianElimination, Matrix};
    pub use crate::solver::{ConcurrentSolver,
                            LinearSystem,
                            SequentialSolver,
                            Solution,
                            SolveError,
                            Solver,
                            SolverConfiguration,
                            WorkerBackend};
}
