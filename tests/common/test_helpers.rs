//! Helper functions for integration tests

#![allow(dead_code)]

use nalgebra::DVector;

use cramer_rs::solver::LinearSystem;

/// Assert that every component of `actual` is within `tolerance` of `expected`
pub fn assert_vectors_close(actual: &DVector<f64>, expected: &[f64], tolerance: f64, message: &str) {
    assert_eq!(actual.len(), expected.len(), "{}: Dimension mismatch", message);

    for (i, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        assert!(
            diff < tolerance,
            "{}: Element {} differs by {} (tolerance {})",
            message, i, diff, tolerance
        );
    }
}

/// Largest |(A·X - B)[i]|
pub fn max_residual(system: &LinearSystem, x: &DVector<f64>) -> f64 {
    let residual = system.coefficients().as_dmatrix() * x - system.constants();
    residual.amax()
}
