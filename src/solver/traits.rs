//! Solver traits and types
//!
//! # Design
//!
//! - [`Solver`]: the single entry point both strategies implement
//! - [`SolverConfiguration`]: HOW the concurrent strategy dispatches and waits
//! - [`Solution`]: the complete solution vector plus metadata
//!
//! The sequential solver ignores the dispatch settings; it only shares the
//! trait so the benchmark driver can time both strategies the same way.

use std::collections::HashMap;
use std::time::Duration;

use nalgebra::DVector;

use crate::solver::error::SolveError;
use crate::solver::system::LinearSystem;

// =================================================================================================
// Solver trait
// =================================================================================================

/// Cramer's Rule solver
///
/// # Contract
///
/// - `Ok` always carries a vector with exactly `system.size()` entries, every
///   one of them computed for this call.
/// - A singular system yields [`SolveError::NoSolution`], never a panic.
pub trait Solver {
    /// Solve `AX = B`
    fn solve(&self, system: &LinearSystem) -> Result<Solution, SolveError>;

    /// Human readable name
    fn name(&self) -> &str;
}

// =================================================================================================
// Solution
// =================================================================================================

/// Complete solution of a linear system
#[derive(Debug, Clone)]
pub struct Solution {
    /// X, one entry per unknown
    pub values: DVector<f64>,

    /// det(A) shared by every unknown
    pub determinant: f64,

    /// Diagnostics (solver, engine, worker counts)
    pub metadata: HashMap<String, String>,
}

impl Solution {
    /// Create a solution without metadata
    pub fn new(values: DVector<f64>, determinant: f64) -> Self {
        Self { values, determinant, metadata: HashMap::new() }
    }

    /// Number of unknowns
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True for a zero-length vector
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of unknown `i`
    pub fn get(&self, i: usize) -> Option<f64> {
        self.values.get(i).copied()
    }

    /// Attach a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Largest absolute difference with another solution
    ///
    /// Returns `None` when the lengths differ.
    pub fn max_abs_deviation(&self, other: &Solution) -> Option<f64> {
        if self.len() != other.len() {
            return None;
        }
        Some(
            self.values
                .iter()
                .zip(other.values.iter())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
        )
    }
}

// =================================================================================================
// Worker backends
// =================================================================================================

/// Execution units used by the concurrent solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkerBackend {
    /// One OS thread per unknown
    #[default]
    Threads,

    /// One task per unknown in a dedicated rayon pool
    ///
    /// `max_threads` caps how many workers run at once; `None` lets rayon
    /// choose (one per logical CPU).
    #[cfg(feature = "parallel")]
    Rayon { max_threads: Option<usize> },
}

impl WorkerBackend {
    /// Name identifier
    pub fn name(&self) -> &'static str {
        match self {
            WorkerBackend::Threads => "threads",
            #[cfg(feature = "parallel")]
            WorkerBackend::Rayon { .. } => "rayon",
        }
    }
}

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Configuration of the concurrent dispatch
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use cramer_rs::solver::{SolverConfiguration, WorkerBackend};
///
/// let config = SolverConfiguration::default()
///     .with_timeout(Duration::from_secs(30))
///     .with_backend(WorkerBackend::Threads);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolverConfiguration {
    /// Aggregation deadline, measured from dispatch
    ///
    /// `None` waits until every worker has reported.
    pub timeout: Option<Duration>,

    /// Worker execution units
    pub backend: WorkerBackend,
}

impl SolverConfiguration {
    /// Create a configuration
    pub fn new(timeout: Option<Duration>, backend: WorkerBackend) -> Self {
        Self { timeout, backend }
    }

    /// Builder pattern: set the aggregation deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builder pattern: set the backend
    pub fn with_backend(mut self, backend: WorkerBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(timeout) = self.timeout
            && timeout.is_zero() {
                return Err("Timeout must be greater than 0".to_string());
            }

        #[cfg(feature = "parallel")]
        if let WorkerBackend::Rayon { max_threads: Some(0) } = self.backend {
            return Err("Rayon backend needs at least one thread".to_string());
        }

        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = SolverConfiguration::default();
        assert_eq!(config.timeout, None);
        assert_eq!(config.backend, WorkerBackend::Threads);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = SolverConfiguration::default().with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_rayon_zero_threads_rejected() {
        let config = SolverConfiguration::default()
            .with_backend(WorkerBackend::Rayon { max_threads: Some(0) });
        assert!(config.validate().is_err());
        assert_eq!(config.backend.name(), "rayon");
    }

    #[test]
    fn test_solution_accessors() {
        let mut solution = Solution::new(DVector::from_vec(vec![1.0, 2.0]), -3.0);
        solution.add_metadata("solver", "test");

        assert_eq!(solution.len(), 2);
        assert!(!solution.is_empty());
        assert_eq!(solution.get(1), Some(2.0));
        assert_eq!(solution.get(2), None);
        assert_eq!(solution.metadata.get("solver").map(String::as_str), Some("test"));
    }

    #[test]
    fn test_max_abs_deviation() {
        let a = Solution::new(DVector::from_vec(vec![1.0, 2.0]), 1.0);
        let b = Solution::new(DVector::from_vec(vec![1.5, 1.0]), 1.0);
        let c = Solution::new(DVector::from_vec(vec![1.0]), 1.0);

        assert_eq!(a.max_abs_deviation(&b), Some(1.0));
        assert_eq!(a.max_abs_deviation(&c), None);
    }
}
