//! Determinant by forward Gaussian elimination
//!
//! # Algorithm
//!
//! For each pivot row `i` in `0..n`:
//!
//! 1. If `|a[i][i]| < tolerance`, the matrix is reported as singular and `0.0`
//!    is returned immediately.
//! 2. Every row `j > i` is reduced with `factor = a[j][i] / a[i][i]`, updating
//!    the full row.
//! 3. The pivot is multiplied into the running product.
//!
//! Cost: O(n³).
//!
//! # No Pivoting
//!
//! Rows are never exchanged. A matrix whose leading entry is zero, such as
//! `[[0, 1], [1, 0]]`, is reported as singular although its true determinant
//! is `-1`. Solvers rely on this exact behaviour: a zero return is the
//! "no unique solution" signal.
//!
//! # Destructive Evaluation
//!
//! [`Determinant::determinant`] reduces the matrix in place. Callers pass a
//! disposable clone, never a system's canonical coefficient matrix.
//!
//! # Cancellation
//!
//! [`Determinant::determinant_until`] takes a flag owned by the caller and
//! returns `None` once it is raised. [`GaussianElimination`] polls it before
//! every pivot row, so an abandoned worker stops within one O(n²) row sweep.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::linalg::matrix::Matrix;

/// Default threshold under which a pivot counts as zero
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-9;

/// Determinant engine consumed by the solvers
///
/// Implementations must be shareable across worker threads: the concurrent
/// solver hands one engine to every worker through an `Arc`.
pub trait Determinant: Send + Sync {
    /// Compute the determinant of `matrix`, destroying its contents
    fn determinant(&self, matrix: &mut Matrix) -> f64;

    /// Like [`determinant`](Self::determinant), but gives up with `None` once
    /// `cancelled` is raised
    ///
    /// The default only checks the flag before starting.
    fn determinant_until(&self, matrix: &mut Matrix, cancelled: &AtomicBool) -> Option<f64> {
        if cancelled.load(Ordering::Relaxed) {
            return None;
        }
        Some(self.determinant(matrix))
    }

    /// Engine name, recorded in solution metadata
    fn name(&self) -> &str;
}

/// Forward elimination without row exchanges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianElimination {
    /// Pivots with an absolute value below this are treated as zero
    pub pivot_tolerance: f64,
}

impl GaussianElimination {
    /// Engine with the default `1e-9` pivot tolerance
    pub fn new() -> Self {
        Self { pivot_tolerance: DEFAULT_PIVOT_TOLERANCE }
    }

    /// Engine with a custom pivot tolerance
    pub fn with_tolerance(pivot_tolerance: f64) -> Self {
        Self { pivot_tolerance }
    }
}

impl Default for GaussianElimination {
    fn default() -> Self {
        Self::new()
    }
}

impl GaussianElimination {
    fn eliminate(&self, matrix: &mut Matrix, cancelled: Option<&AtomicBool>) -> Option<f64> {
        let n = matrix.dim();
        let mut product = 1.0;

        for i in 0..n {
            if cancelled.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return None;
            }

            let pivot = matrix[(i, i)];
            if pivot.abs() < self.pivot_tolerance {
                return Some(0.0);
            }

            for j in (i + 1)..n {
                let factor = matrix[(j, i)] / pivot;
                for k in 0..n {
                    matrix[(j, k)] -= factor * matrix[(i, k)];
                }
            }

            product *= pivot;
        }

        Some(product)
    }
}

impl Determinant for GaussianElimination {
    fn determinant(&self, matrix: &mut Matrix) -> f64 {
        self.eliminate(matrix, None).unwrap_or(0.0)
    }

    fn determinant_until(&self, matrix: &mut Matrix, cancelled: &AtomicBool) -> Option<f64> {
        self.eliminate(matrix, Some(cancelled))
    }

    fn name(&self) -> &str {
        "Gaussian Elimination"
    }
}

/// Determinant with the default engine
///
/// ```rust
/// use cramer_rs::linalg::{determinant, Matrix};
///
/// let mut m = Matrix::from_rows(&[vec![2.0, 1.0], vec![4.0, 3.0]]).unwrap();
/// assert!((determinant(&mut m) - 2.0).abs() < 1e-12);
/// ```
pub fn determinant(matrix: &mut Matrix) -> f64 {
    GaussianElimination::new().determinant(matrix)
}

// =================================================================================================
// Tests
// =================================================================================================
