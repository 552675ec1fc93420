//! Sequential Cramer's Rule
//!
//! # Method
//!
//! ```text
//! det_a = det(clone(A))
//! if det_a == 0 → no unique solution
//! for i in 0..n:
//!     A_i  = clone(A) with column i replaced by B
//!     X[i] = det(A_i) / det_a
//! ```
//!
//! One control flow, n + 1 determinants of cost O(n³) each: O(n⁴) overall.
//! Every clone lives for exactly one determinant evaluation.
//!
//! The result depends only on `A` and `B`; repeated calls on the same system
//! return bit-identical vectors.

use std::sync::Arc;

use nalgebra::DVector;

use crate::linalg::{Determinant, GaussianElimination, Matrix};
use crate::solver::error::SolveError;
use crate::solver::system::LinearSystem;
use crate::solver::traits::{Solution, Solver};

/// Computes each unknown in turn
///
/// # Example
///
/// ```rust
/// use cramer_rs::solver::{LinearSystem, SequentialSolver, Solver};
///
/// let system = LinearSystem::from_rows(&[vec![1.0, 1.0], vec![2.0, -1.0]], &[3.0, 0.0]).unwrap();
/// let solution = SequentialSolver::new().solve(&system).unwrap();
///
/// assert!((solution.values[0] - 1.0).abs() < 1e-12);
/// assert!((solution.values[1] - 2.0).abs() < 1e-12);
/// ```
#[derive(Clone)]
pub struct SequentialSolver {
    engine: Arc<dyn Determinant>,
}

impl SequentialSolver {
    /// Solver using Gaussian elimination
    pub fn new() -> Self {
        Self::with_engine(Arc::new(GaussianElimination::new()))
    }

    /// Solver using a specific determinant engine
    pub fn with_engine(engine: Arc<dyn Determinant>) -> Self {
        Self { engine }
    }
}

impl Default for SequentialSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for SequentialSolver {
    fn solve(&self, system: &LinearSystem) -> Result<Solution, SolveError> {
        let n = system.size();

        // ====== Step 1: main determinant ======

        let det_a = {
            let mut scratch = Matrix::clone(system.coefficients());
            self.engine.determinant(&mut scratch)
        };

        if det_a == 0.0 {
            log::warn!("{}: no unique solution for n={}", self.name(), n);
            return Err(SolveError::NoSolution { determinant: det_a });
        }

        // ====== Step 2: one substituted determinant per unknown ======

        let mut values = DVector::zeros(n);
        for i in 0..n {
            let mut substituted = system.substituted(i)?;
            values[i] = self.engine.determinant(&mut substituted) / det_a;
        }

        // ====== Step 3: result ======

        let mut solution = Solution::new(values, det_a);
        solution.add_metadata("solver", self.name());
        solution.add_metadata("engine", self.engine.name());
        solution.add_metadata("size", &n.to_string());

        Ok(solution)
    }

    fn name(&self) -> &str {
        "Sequential Cramer"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
