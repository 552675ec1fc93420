//! Seeded random systems
//!
//! Coefficients and constants are integers drawn uniformly from a half-open
//! range (default `[0, 10)`) and stored as `f64`. For each row, `B[i]` is drawn
//! first, then `A[i][0..n]`.
//!
//! The generator owns its `StdRng`: two generators built from the same seed
//! produce the same sequence of systems.

use std::ops::Range;

use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::linalg::{Matrix, MatrixError};
use crate::solver::LinearSystem;

/// Default value range, `[0, 10)`
pub const DEFAULT_VALUE_RANGE: Range<i32> = 0..10;

/// Produces random linear systems from an explicit seed
#[derive(Debug, Clone)]
pub struct SystemGenerator {
    rng: StdRng,
    range: Range<i32>,
}

impl SystemGenerator {
    /// Generator over `range`, rejected when the range is empty
    pub fn new(seed: u64, range: Range<i32>) -> Result<Self, String> {
        if range.is_empty() {
            return Err(format!("Value range {}..{} is empty", range.start, range.end));
        }
        Ok(Self { rng: StdRng::seed_from_u64(seed), range })
    }

    /// Generator over `[0, 10)`
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed), range: DEFAULT_VALUE_RANGE }
    }

    /// Draw the next n×n system
    pub fn generate(&mut self, n: usize) -> Result<LinearSystem, MatrixError> {
        let mut a = Matrix::allocate(n)?;
        let mut b = DVector::zeros(n);

        for i in 0..n {
            b[i] = self.draw();
            for j in 0..n {
                a[(i, j)] = self.draw();
            }
        }

        LinearSystem::new(a, b)
    }

    fn draw(&mut self) -> f64 {
        f64::from(self.rng.random_range(self.range.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_system() {
        let first = SystemGenerator::with_seed(7).generate(5).unwrap();
        let second = SystemGenerator::with_seed(7).generate(5).unwrap();

        assert_eq!(first.coefficients(), second.coefficients());
        assert_eq!(first.constants(), second.constants());
    }

    #[test]
    fn test_values_within_range() {
        let system = SystemGenerator::new(3, -2..3).unwrap().generate(8).unwrap();

        for i in 0..8 {
            assert!((-2.0..3.0).contains(&system.constants()[i]));
            for value in system.coefficients().row(i) {
                assert!((-2.0..3.0).contains(&value));
                assert_eq!(value.fract(), 0.0);
            }
        }
    }

    #[test]
    fn test_successive_systems_differ() {
        let mut generator = SystemGenerator::with_seed(11);
        let first = generator.generate(6).unwrap();
        let second = generator.generate(6).unwrap();
        assert_ne!(first.coefficients(), second.coefficients());
    }

    #[test]
    fn test_zero_size_rejected() {
        let err = SystemGenerator::with_seed(1).generate(0).unwrap_err();
        assert_eq!(err, MatrixError::InvalidSize(0));
    }

    #[test]
    fn test_empty_range_rejected() {
        let err = SystemGenerator::new(1, 5..5).unwrap_err();
        assert_eq!(err, "Value range 5..5 is empty");

        #[allow(clippy::reversed_empty_ranges)]
        let reversed = 4..-4;
        assert!(SystemGenerator::new(1, reversed).is_err());
    }

    #[test]
    fn test_default_range_matches_explicit() {
        let mut implicit = SystemGenerator::with_seed(9);
        let mut explicit = SystemGenerator::new(9, DEFAULT_VALUE_RANGE).unwrap();
        assert_eq!(
            implicit.generate(4).unwrap().coefficients(),
            explicit.generate(4).unwrap().coefficients()
        );
    }
}
