//! Performance benchmarks for the Cramer solvers
//!
//! Compares the sequential solver with the concurrent solver on identical
//! systems.
//!
//! # What We're Measuring
//!
//! 1. **Sequential**: n+1 determinants, one after another, O(n⁴) overall
//! 2. **Concurrent (threads)**: det(A) on the caller, then one OS thread per
//!    unknown; thread start-up is part of the measured time
//! 3. **Concurrent (rayon)**: same fan-out on a bounded rayon pool
//!
//! # Expected Results
//!
//! For small n the fan-out costs more than it saves and the sequential solver
//! wins. Once each determinant takes longer than spawning a worker, the
//! concurrent solver approaches `min(n, cores)`× speedup, capped by the
//! sequential det(A) that precedes dispatch.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Everything
//! cargo bench --bench solver_performance
//!
//! # Only the head-to-head group
//! cargo bench --bench solver_performance comparison
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use cramer_rs::benchmark::SystemGenerator;
use cramer_rs::linalg::{determinant, Matrix};
use cramer_rs::solver::{ConcurrentSolver, LinearSystem, SequentialSolver, Solver};

// =================================================================================================
// Systems
// =================================================================================================

/// First seeded system of size `n` whose det(A) is reported non-zero
fn solvable_system(n: usize) -> LinearSystem {
    (0..)
        .map(|seed| SystemGenerator::with_seed(seed).generate(n).unwrap())
        .find(|system| {
            let mut scratch = Matrix::clone(system.coefficients());
            determinant(&mut scratch) != 0.0
        })
        .unwrap()
}

// =================================================================================================
// Benchmark Functions
// =================================================================================================

/// Determinant engine alone, the unit of work every worker performs
fn benchmark_determinant(c: &mut Criterion) {
    let mut group = c.benchmark_group("Gaussian Elimination");

    for n in [8, 32, 128] {
        let system = solvable_system(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &system, |b, system| {
            b.iter_batched(
                || Matrix::clone(system.coefficients()),
                |mut matrix| determinant(black_box(&mut matrix)),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

/// Sequential vs concurrent on the same systems
fn benchmark_solver_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("Solver Comparison");
    group.sample_size(20);

    let sequential = SequentialSolver::new();
    let threads = ConcurrentSolver::default();

    for n in [4, 16, 64, 128] {
        let system = solvable_system(n);

        group.bench_with_input(BenchmarkId::new("Sequential", n), &system, |b, system| {
            b.iter(|| sequential.solve(black_box(system)).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("Concurrent threads", n), &system, |b, system| {
            b.iter(|| threads.solve(black_box(system)).unwrap());
        });

        #[cfg(feature = "parallel")]
        {
            use cramer_rs::solver::{SolverConfiguration, WorkerBackend};

            let rayon = ConcurrentSolver::new(
                SolverConfiguration::default().with_backend(WorkerBackend::Rayon { max_threads: None }),
            );
            group.bench_with_input(BenchmarkId::new("Concurrent rayon", n), &system, |b, system| {
                b.iter(|| rayon.solve(black_box(system)).unwrap());
            });
        }
    }

    group.finish();
}

// =================================================================================================
// Criterion Configuration
// =================================================================================================

criterion_group!(benches, benchmark_determinant, benchmark_solver_comparison);
criterion_main!(benches);
