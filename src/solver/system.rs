//! Linear system definition
//!
//! A [`LinearSystem`] is the WHAT of a solve: the coefficient matrix `A` and the
//! constant vector `B` of `AX = B`. It is immutable once built.
use std::sync::Arc;

use nalgebra::DVector;

use crate::linalg::{Matrix, MatrixError};

/// Square system `AX = B`
///
/// # Sharing
///
/// `A` and `B` sit behind `Arc`s. Cloning a system is cheap and every clone
/// reads the same canonical data, which is how the concurrent solver hands
/// the inputs to its workers without copying them per worker.
///
/// # Examples
///
/// ```rust
/// use cramer_rs::linalg::Matrix;
/// use cramer_rs::solver::LinearSystem;
/// use nalgebra::DVector;
///
/// let a = Matrix::from_rows(&[vec![1.0, 1.0], vec![2.0, -1.0]]).unwrap();
/// let b = DVector::from_vec(vec![3.0, 0.0]);
/// let system = LinearSystem::new(a, b).unwrap();
/// assert_eq!(system.size(), 2);
/// ```
#[derive(Clone)]
pub struct LinearSystem {
    a: Arc<Matrix>,
    b: Arc<DVector<f64>>,
}

impl LinearSystem {
    /// Create a system, checking that `b` has one entry per row of `a`
    pub fn new(a: Matrix, b: DVector<f64>) -> Result<Self, MatrixError> {
        if b.len() != a.dim() {
            return Err(MatrixError::DimensionMismatch {
                expected: a.dim(),
                actual: b.len(),
            });
        }
        Ok(Self { a: Arc::new(a), b: Arc::new(b) })
    }

    /// Create a system from row vectors and a constant slice
    pub fn from_rows(rows: &[Vec<f64>], constants: &[f64]) -> Result<Self, MatrixError> {
        let a = Matrix::from_rows(rows)?;
        Self::new(a, DVector::from_column_slice(constants))
    }

    /// Number of unknowns
    pub fn size(&self) -> usize {
        self.a.dim()
    }

    /// Coefficient matrix `A`
    pub fn coefficients(&self) -> &Matrix {
        &self.a
    }

    /// Constant vector `B`
    pub fn constants(&self) -> &DVector<f64> {
        &self.b
    }

    /// `A` with column `column` replaced by `B`, as a fresh owned copy
    pub fn substituted(&self, column: usize) -> Result<Matrix, MatrixError> {
        let mut copy = Matrix::clone(&self.a);
        copy.replace_column(column, &self.b)?;
        Ok(copy)
    }
}

impl std::fmt::Debug for LinearSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinearSystem")
            .field("size", &self.size())
            .field("a", &self.a)
            .field("b", &self.b)
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
