//! Concurrent Cramer's Rule
//!
//! # Method
//!
//! 1. The coordinator computes `det_a = det(clone(A))` before anything is
//!    dispatched. A zero determinant ends the solve with no worker spawned.
//! 2. One worker per unknown `i` receives the shared, read-only inputs
//!    (`A`, `B`, `det_a`, the engine) and its index. It builds a private copy
//!    of `A`, substitutes column `i` with `B`, evaluates the determinant and
//!    sends back `WorkerResult { index: i, value: det(A_i) / det_a }`.
//! 3. The coordinator waits at the aggregation barrier of [`FanOut`] and
//!    writes each value into its own slot of `X`.
//!
//! Workers never touch `X`. The return channel is the only path a value has
//! back to the coordinator, so a value that was computed is a value that was
//! merged, and a value that was not computed is reported as missing.
//!
//! # Outcomes
//!
//! | Barrier state | Result |
//! |---------------|--------|
//! | all n values merged | `Ok(Solution)` |
//! | deadline elapsed | [`SolveError::Timeout`] |
//! | every worker reported, some failed | [`SolveError::IncompleteAggregation`] |
//!
//! After a timeout, workers still inside elimination see the pool's
//! cancellation flag at their next pivot row and stop, so they do not keep
//! loading the CPU while the caller moves on.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use nalgebra::DVector;

use crate::linalg::{Determinant, GaussianElimination, Matrix};
use crate::solver::error::{FailureReason, SolveError};
use crate::solver::pool::FanOut;
use crate::solver::system::LinearSystem;
use crate::solver::traits::{Solution, Solver, SolverConfiguration};

/// Computes each unknown in an independent worker
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use cramer_rs::solver::{ConcurrentSolver, LinearSystem, Solver, SolverConfiguration};
///
/// let system = LinearSystem::from_rows(&[vec![1.0, 1.0], vec![2.0, -1.0]], &[3.0, 0.0]).unwrap();
/// let config = SolverConfiguration::default().with_timeout(Duration::from_secs(5));
///
/// let solution = ConcurrentSolver::new(config).solve(&system).unwrap();
/// assert!((solution.values[1] - 2.0).abs() < 1e-12);
/// ```
#[derive(Clone)]
pub struct ConcurrentSolver {
    engine: Arc<dyn Determinant>,
    configuration: SolverConfiguration,
}

impl ConcurrentSolver {
    /// Solver using Gaussian elimination
    pub fn new(configuration: SolverConfiguration) -> Self {
        Self::with_engine(Arc::new(GaussianElimination::new()), configuration)
    }

    /// Solver using a specific determinant engine
    pub fn with_engine(engine: Arc<dyn Determinant>, configuration: SolverConfiguration) -> Self {
        Self { engine, configuration }
    }

    /// Dispatch configuration
    pub fn configuration(&self) -> &SolverConfiguration {
        &self.configuration
    }
}

impl Default for ConcurrentSolver {
    fn default() -> Self {
        Self::new(SolverConfiguration::default())
    }
}

impl Solver for ConcurrentSolver {
    fn solve(&self, system: &LinearSystem) -> Result<Solution, SolveError> {
        self.configuration
            .validate()
            .map_err(SolveError::InvalidConfiguration)?;

        let n = system.size();

        // ====== Step 1: shared determinant, fixed before dispatch ======

        let det_a = {
            let mut scratch = Matrix::clone(system.coefficients());
            self.engine.determinant(&mut scratch)
        };

        if det_a == 0.0 {
            log::warn!("{}: no unique solution for n={}, no worker spawned", self.name(), n);
            return Err(SolveError::NoSolution { determinant: det_a });
        }

        // ====== Step 2: fan out, one worker per unknown ======

        let shared = system.clone();
        let engine = Arc::clone(&self.engine);

        let job = move |index: usize, cancelled: &AtomicBool| -> Result<f64, FailureReason> {
            let mut private = shared.substituted(index).map_err(FailureReason::Matrix)?;
            let det_i = engine
                .determinant_until(&mut private, cancelled)
                .ok_or(FailureReason::Cancelled)?;
            Ok(det_i / det_a)
        };

        // ====== Step 3: aggregation barrier ======

        let pool = FanOut::from_configuration(&self.configuration);
        let values = pool.run_cancellable(n, job).map_err(|report| {
            log::warn!("{}: n={} {}", self.name(), n, report);
            if report.timed_out {
                SolveError::Timeout(report)
            } else {
                SolveError::IncompleteAggregation(report)
            }
        })?;

        // ====== Step 4: result ======

        let mut solution = Solution::new(DVector::from_vec(values), det_a);
        solution.add_metadata("solver", self.name());
        solution.add_metadata("engine", self.engine.name());
        solution.add_metadata("size", &n.to_string());
        solution.add_metadata("workers", &n.to_string());
        solution.add_metadata("backend", self.configuration.backend.name());

        Ok(solution)
    }

    fn name(&self) -> &str {
        "Concurrent Cramer"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
