//! Cramer's Rule solvers
//!
//! # Core Concepts
//!
//! 1. **System** (`LinearSystem`) - WHAT to solve: `A` and `B` of `AX = B`
//! 2. **Configuration** (`SolverConfiguration`) - HOW the concurrent solver
//!    dispatches workers and how long it waits for them
//! 3. **Solver** (`Solver` trait) - the strategy, sequential or concurrent
//!
//! # Module Organization
//!
//! - **`system`**: `LinearSystem`
//! - **`traits`**: `Solver`, `Solution`, `SolverConfiguration`, `WorkerBackend`
//! - **`error`**: `SolveError` and the aggregation report
//! - **`pool`**: `FanOut`, the worker pool and aggregation barrier
//! - **`methods`**: `SequentialSolver`, `ConcurrentSolver`
//!
//! # Quick Start
//!
//! ```rust
//! use cramer_rs::solver::{
//!     ConcurrentSolver, LinearSystem, SequentialSolver, Solver, SolverConfiguration,
//! };
//!
//! let system = LinearSystem::from_rows(
//!     &[vec![1.0, 1.0], vec![2.0, -1.0]],
//!     &[3.0, 0.0],
//! ).unwrap();
//!
//! let sequential = SequentialSolver::new().solve(&system).unwrap();
//! let concurrent = ConcurrentSolver::new(SolverConfiguration::default())
//!     .solve(&system)
//!     .unwrap();
//!
//! assert!(sequential.max_abs_deviation(&concurrent).unwrap() < 1e-9);
//! ```
//!
//! # Error Handling
//!
//! Every solver returns `Result<Solution, SolveError>`:
//!
//! ```rust,ignore
//! match solver.solve(&system) {
//!     Ok(solution) => println!("x0 = {}", solution.values[0]),
//!     Err(e) if e.is_no_solution() => println!("singular system"),
//!     Err(e) => eprintln!("solve failed: {}", e),
//! }
//! ```
//!
//! Common errors:
//! - Singular system (zero main determinant)
//! - Aggregation timeout (workers slower than the configured deadline)
//! - Incomplete aggregation (a worker crashed or could not be spawned)

// =================================================================================================
// Module Declarations
// =================================================================================================
mod error;
mod methods;
mod pool;
mod system;
mod traits;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use error::{AggregationReport, FailureReason, SolveError, WorkerFailure};
pub use methods::{ConcurrentSolver, SequentialSolver};
pub use pool::{FanOut, WorkerResult};
pub use system::LinearSystem;
pub use traits::{Solution, Solver, SolverConfiguration, WorkerBackend};
