//! Solver outcomes other than a complete solution
//!
//! | Variant | Cause |
//! |---------|-------|
//! | [`SolveError::NoSolution`] | `det(A)` reported as zero |
//! | [`SolveError::Timeout`] | deadline elapsed before all worker results arrived |
//! | [`SolveError::IncompleteAggregation`] | every worker reported, some with a failure |
//! | [`SolveError::InvalidConfiguration`] | rejected [`SolverConfiguration`](crate::solver::SolverConfiguration) |
//! | [`SolveError::InvalidSystem`] | matrix store rejected an operation |
//!
//! None of these abort the process. The benchmark driver records each of them
//! as an outcome and moves on to the next size.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::linalg::MatrixError;

/// Why a worker produced no value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    /// The worker panicked; carries the panic message when it was a string
    #[error("panicked: {0}")]
    Panicked(String),

    /// The execution unit could not be started
    #[error("spawn failed: {0}")]
    SpawnFailed(String),

    /// A second result arrived for an index that was already filled
    #[error("duplicate result")]
    Duplicate,

    /// The job saw the cancellation flag and stopped early
    #[error("cancelled")]
    Cancelled,

    /// The worker could not build its private matrix copy
    #[error(transparent)]
    Matrix(MatrixError),
}

/// Explicit non-result for one unknown
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("worker {index} {reason}")]
pub struct WorkerFailure {
    pub index: usize,
    pub reason: FailureReason,
}

/// State of the aggregation barrier when it gave up
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationReport {
    /// Number of results the barrier waited for
    pub expected: usize,

    /// Number of values merged into the solution vector
    pub received: usize,

    /// Indices with no merged value, ascending
    pub missing: Vec<usize>,

    /// Explicit failures reported by workers
    pub failures: Vec<WorkerFailure>,

    /// Whether the deadline elapsed
    pub timed_out: bool,

    /// Time spent at the barrier
    pub elapsed: Duration,
}

impl fmt::Display for AggregationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} results after {:.3?}, {} failure(s), missing {:?}",
            self.received,
            self.expected,
            self.elapsed,
            self.failures.len(),
            self.missing
        )
    }
}

/// Error type returned by every [`Solver`](crate::solver::Solver)
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("no unique solution: det(A) = {determinant}")]
    NoSolution { determinant: f64 },

    #[error("aggregation timed out: {0}")]
    Timeout(AggregationReport),

    #[error("incomplete aggregation: {0}")]
    IncompleteAggregation(AggregationReport),

    #[error("invalid solver configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid system: {0}")]
    InvalidSystem(#[from] MatrixError),
}

impl SolveError {
    /// Singular system
    pub fn is_no_solution(&self) -> bool {
        matches!(self, SolveError::NoSolution { .. })
    }

    /// Deadline elapsed at the aggregation barrier
    pub fn is_timeout(&self) -> bool {
        matches!(self, SolveError::Timeout(_))
    }

    /// Barrier report, for the two aggregation failures
    pub fn report(&self) -> Option<&AggregationReport> {
        match self {
            SolveError::Timeout(report) | SolveError::IncompleteAggregation(report) => Some(report),
            _ => None,
        }
    }
}
