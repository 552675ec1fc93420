//! Dense square matrix storage
//!
//! [`Matrix`] is a thin owner around `nalgebra::DMatrix<f64>` that only admits
//! square, non-empty shapes. It carries the four operations Cramer's Rule needs:
//!
//! | Operation | Method |
//! |-----------|--------|
//! | allocate  | [`Matrix::allocate`] |
//! | clone     | [`Clone::clone`] (deep copy) |
//! | replace column | [`Matrix::replace_column`] |
//! | release   | `Drop` (end of ownership) |
//!
//! # Ownership
//!
//! Elimination is destructive, so every determinant is computed on a clone.
//! Clones are plain owned values: they are released when they go out of scope,
//! whether the scope ends normally, through `?`, or by unwinding.

use nalgebra::{DMatrix, DVector};
use std::fmt;
use std::ops::{Index, IndexMut};
use thiserror::Error;

/// Errors raised by the matrix store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// Requested dimension is zero
    #[error("invalid matrix size {0}: dimension must be at least 1")]
    InvalidSize(usize),

    /// Rows of unequal length, or row count different from column count
    #[error("matrix is not square: {rows} rows, row {row} has {cols} columns")]
    NotSquare { rows: usize, row: usize, cols: usize },

    /// Column index outside `0..n`
    #[error("column {column} out of range for {dim}x{dim} matrix")]
    ColumnOutOfRange { column: usize, dim: usize },

    /// Vector length does not match the matrix dimension
    #[error("dimension mismatch: expected length {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Dense n×n matrix of `f64`
///
/// # Example
///
/// ```rust
/// use cramer_rs::linalg::Matrix;
/// use nalgebra::DVector;
///
/// let a = Matrix::from_rows(&[vec![1.0, 1.0], vec![2.0, -1.0]]).unwrap();
/// let b = DVector::from_vec(vec![3.0, 0.0]);
///
/// let mut a0 = a.clone();
/// a0.replace_column(0, &b).unwrap();
/// assert_eq!(a0[(0, 0)], 3.0);
/// assert_eq!(a[(0, 0)], 1.0);
/// ```
#[derive(Clone, PartialEq)]
pub struct Matrix {
    data: DMatrix<f64>,
}

impl Matrix {
    /// Allocate a zero-filled n×n matrix
    pub fn allocate(n: usize) -> Result<Self, MatrixError> {
        if n == 0 {
            return Err(MatrixError::InvalidSize(n));
        }
        Ok(Self { data: DMatrix::zeros(n, n) })
    }

    /// Build a matrix from row vectors
    ///
    /// Every row must have exactly as many entries as there are rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, MatrixError> {
        let n = rows.len();
        if n == 0 {
            return Err(MatrixError::InvalidSize(0));
        }

        for (row, values) in rows.iter().enumerate() {
            if values.len() != n {
                return Err(MatrixError::NotSquare { rows: n, row, cols: values.len() });
            }
        }

        Ok(Self {
            data: DMatrix::from_fn(n, n, |i, j| rows[i][j]),
        })
    }

    /// Wrap an existing nalgebra matrix
    pub fn from_dmatrix(data: DMatrix<f64>) -> Result<Self, MatrixError> {
        if data.nrows() == 0 {
            return Err(MatrixError::InvalidSize(0));
        }
        if data.nrows() != data.ncols() {
            return Err(MatrixError::NotSquare {
                rows: data.nrows(),
                row: 0,
                cols: data.ncols(),
            });
        }
        Ok(Self { data })
    }

    /// Dimension n of the n×n matrix
    pub fn dim(&self) -> usize {
        self.data.nrows()
    }

    /// Overwrite column `column` with `vector`, in place
    pub fn replace_column(&mut self, column: usize, vector: &DVector<f64>) -> Result<(), MatrixError> {
        let n = self.dim();
        if column >= n {
            return Err(MatrixError::ColumnOutOfRange { column, dim: n });
        }
        if vector.len() != n {
            return Err(MatrixError::DimensionMismatch { expected: n, actual: vector.len() });
        }

        self.data.set_column(column, vector);
        Ok(())
    }

    /// Copy of row `i` as a plain vector
    pub fn row(&self, i: usize) -> Vec<f64> {
        self.data.row(i).iter().copied().collect()
    }

    /// Borrow the underlying nalgebra storage
    pub fn as_dmatrix(&self) -> &DMatrix<f64> {
        &self.data
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[index]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.data[index]
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("dim", &self.dim())
            .field("data", &self.data)
            .finish()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_is_zero_filled() {
        let m = Matrix::allocate(3).unwrap();
        assert_eq!(m.dim(), 3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(m[(i, j)], 0.0);
            }
        }
    }

    #[test]
    fn test_allocate_rejects_zero() {
        assert_eq!(Matrix::allocate(0), Err(MatrixError::InvalidSize(0)));
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let err = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(err, MatrixError::NotSquare { rows: 2, row: 1, cols: 1 });
    }

    #[test]
    fn test_from_dmatrix_rejects_rectangular() {
        let err = Matrix::from_dmatrix(DMatrix::zeros(2, 3)).unwrap_err();
        assert!(matches!(err, MatrixError::NotSquare { .. }));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let mut copy = original.clone();
        copy[(0, 0)] = 99.0;

        assert_eq!(original[(0, 0)], 1.0);
        assert_eq!(copy[(0, 0)], 99.0);
    }

    #[test]
    fn test_replace_column() {
        let mut m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        m.replace_column(1, &DVector::from_vec(vec![7.0, 8.0])).unwrap();

        assert_eq!(m.row(0), vec![1.0, 7.0]);
        assert_eq!(m.row(1), vec![3.0, 8.0]);
    }

    #[test]
    fn test_replace_column_out_of_range() {
        let mut m = Matrix::allocate(2).unwrap();
        let err = m.replace_column(2, &DVector::zeros(2)).unwrap_err();
        assert_eq!(err, MatrixError::ColumnOutOfRange { column: 2, dim: 2 });
    }

    #[test]
    fn test_replace_column_length_mismatch() {
        let mut m = Matrix::allocate(2).unwrap();
        let err = m.replace_column(0, &DVector::zeros(3)).unwrap_err();
        assert_eq!(err, MatrixError::DimensionMismatch { expected: 2, actual: 3 });
    }
}
