//! Systems with known answers and determinant engines that misbehave

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use cramer_rs::linalg::{Determinant, GaussianElimination, Matrix};
use cramer_rs::solver::LinearSystem;

/// x + y = 3, 2x - y = 0  →  X = [1, 2]
pub fn two_by_two() -> LinearSystem {
    LinearSystem::from_rows(&[vec![1.0, 1.0], vec![2.0, -1.0]], &[3.0, 0.0]).unwrap()
}

/// X = [2, 3, -1]
pub fn classic_three_by_three() -> LinearSystem {
    LinearSystem::from_rows(
        &[vec![2.0, 1.0, -1.0], vec![-3.0, -1.0, 2.0], vec![-2.0, 1.0, 2.0]],
        &[8.0, -11.0, -3.0],
    )
    .unwrap()
}

/// Non-singular, but elimination without row exchanges stops at A[0][0] = 0
pub fn zero_leading_pivot() -> LinearSystem {
    LinearSystem::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]], &[1.0, 1.0]).unwrap()
}

/// Second row is twice the first
pub fn singular_system() -> LinearSystem {
    LinearSystem::from_rows(&[vec![1.0, 2.0], vec![2.0, 4.0]], &[3.0, 6.0]).unwrap()
}

/// Sleeps before every evaluation except the first (the coordinator's det(A))
pub struct SlowEngine {
    pub delay: Duration,
    pub calls: AtomicUsize,
}

impl SlowEngine {
    pub fn new(delay: Duration) -> Self {
        Self { delay, calls: AtomicUsize::new(0) }
    }
}

impl Determinant for SlowEngine {
    fn determinant(&self, matrix: &mut Matrix) -> f64 {
        if self.calls.fetch_add(1, Ordering::SeqCst) > 0 {
            thread::sleep(self.delay);
        }
        GaussianElimination::new().determinant(matrix)
    }

    fn name(&self) -> &str {
        "Slow"
    }
}

/// Panics on the listed evaluation numbers (0 is the coordinator's det(A))
pub struct PanickingEngine {
    pub fail_on: Vec<usize>,
    pub calls: AtomicUsize,
}

impl PanickingEngine {
    pub fn new(fail_on: Vec<usize>) -> Self {
        Self { fail_on, calls: AtomicUsize::new(0) }
    }

    /// Every worker panics, det(A) still succeeds
    pub fn all_workers() -> Self {
        Self::new((1..1024).collect())
    }
}

impl Determinant for PanickingEngine {
    fn determinant(&self, matrix: &mut Matrix) -> f64 {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.contains(&call) {
            panic!("injected failure on evaluation {}", call);
        }
        GaussianElimination::new().determinant(matrix)
    }

    fn name(&self) -> &str {
        "Panicking"
    }
}
