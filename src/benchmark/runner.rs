//! Benchmark driver
//!
//! For every requested size the runner:
//!
//! 1. draws a random system from the seeded generator
//! 2. times the sequential solver
//! 3. times the concurrent solver on the same system
//! 4. compares both vectors and derives the speedup
//! 5. hands the record to the sink before moving to the next size
//!
//! A singular system, a timeout or a worker failure is an outcome, not an
//! error: it is logged, recorded, and the run continues. Only an invalid
//! configuration or a failing sink stops the run.

use std::ops::Range;
use std::time::Instant;

use thiserror::Error;

use crate::benchmark::generator::{SystemGenerator, DEFAULT_VALUE_RANGE};
use crate::benchmark::record::{BenchmarkRecord, Outcome, RecordSink};
use crate::solver::{ConcurrentSolver, SequentialSolver, Solver, SolverConfiguration};

/// Default tolerance when comparing both solution vectors
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Errors that stop a benchmark run
#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error("invalid benchmark configuration: {0}")]
    InvalidConfiguration(String),

    #[error("failed to write record: {0}")]
    Sink(#[source] Box<dyn std::error::Error + Send + Sync>),
}

// =================================================================================================
// Configuration
// =================================================================================================

/// What to benchmark and how
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Matrix sizes, run in the given order
    pub sizes: Vec<usize>,

    /// Seed of the system generator
    pub seed: u64,

    /// Half-open range of generated integers
    pub value_range: Range<i32>,

    /// Concurrent dispatch settings
    pub solver: SolverConfiguration,

    /// Maximum accepted |X_seq - X_par| before a warning
    pub tolerance: f64,
}

impl BenchmarkConfig {
    /// Configuration with default range, solver settings and tolerance
    pub fn new(sizes: Vec<usize>, seed: u64) -> Self {
        Self {
            sizes,
            seed,
            value_range: DEFAULT_VALUE_RANGE,
            solver: SolverConfiguration::default(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Builder pattern: set solver settings
    pub fn with_solver(mut self, solver: SolverConfiguration) -> Self {
        self.solver = solver;
        self
    }

    /// Builder pattern: set value range
    pub fn with_value_range(mut self, value_range: Range<i32>) -> Self {
        self.value_range = value_range;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.sizes.is_empty() {
            return Err("At least one matrix size is required".to_string());
        }
        if let Some(position) = self.sizes.iter().position(|&n| n == 0) {
            return Err(format!("Matrix size at position {} must be positive", position));
        }
        if self.value_range.is_empty() {
            return Err(format!(
                "Value range {}..{} is empty",
                self.value_range.start, self.value_range.end
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err("Tolerance must be a finite, non-negative number".to_string());
        }
        self.solver.validate()
    }
}

// =================================================================================================
// Runner
// =================================================================================================

/// Runs both solvers over every configured size
pub struct BenchmarkRunner {
    config: BenchmarkConfig,
    sequential: SequentialSolver,
    concurrent: ConcurrentSolver,
}

impl BenchmarkRunner {
    /// Runner with the default Gaussian elimination engine
    pub fn new(config: BenchmarkConfig) -> Result<Self, BenchmarkError> {
        let concurrent = ConcurrentSolver::new(config.solver.clone());
        Self::with_solvers(config, SequentialSolver::new(), concurrent)
    }

    /// Runner with explicit solver instances
    pub fn with_solvers(
        config: BenchmarkConfig,
        sequential: SequentialSolver,
        concurrent: ConcurrentSolver,
    ) -> Result<Self, BenchmarkError> {
        config.validate().map_err(BenchmarkError::InvalidConfiguration)?;
        Ok(Self { config, sequential, concurrent })
    }

    /// Configuration in use
    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Benchmark every size, writing each record to `sink` as soon as it exists
    pub fn run<S: RecordSink>(&self, sink: &mut S) -> Result<Vec<BenchmarkRecord>, BenchmarkError> {
        let mut generator = SystemGenerator::new(self.config.seed, self.config.value_range.clone())
            .map_err(BenchmarkError::InvalidConfiguration)?;
        let mut records = Vec::with_capacity(self.config.sizes.len());

        log::info!(
            "benchmarking {} size(s), seed {}",
            self.config.sizes.len(),
            self.config.seed
        );

        for &n in &self.config.sizes {
            let record = self.run_size(n, &mut generator);
            sink.write_record(&record)
                .map_err(|e| BenchmarkError::Sink(Box::new(e)))?;
            records.push(record);
        }

        Ok(records)
    }

    /// Benchmark a single size with the next system from `generator`
    pub fn run_size(&self, n: usize, generator: &mut SystemGenerator) -> BenchmarkRecord {
        log::info!("Running for matrix size {}", n);

        let system = match generator.generate(n) {
            Ok(system) => system,
            Err(e) => {
                log::error!("size {}: cannot build system: {}", n, e);
                return BenchmarkRecord::new(n, 0.0, 0.0, Outcome::Failed);
            }
        };

        // ====== Timing ======

        let started = Instant::now();
        let sequential = self.sequential.solve(&system);
        let seq_time = started.elapsed().as_secs_f64();

        let started = Instant::now();
        let concurrent = self.concurrent.solve(&system);
        let par_time = started.elapsed().as_secs_f64();

        // ====== Cross-check ======

        let max_deviation = match (&sequential, &concurrent) {
            (Ok(s), Ok(c)) => s.max_abs_deviation(c),
            _ => None,
        };

        if let Some(deviation) = max_deviation
            && deviation > self.config.tolerance {
                log::warn!(
                    "size {}: solvers disagree by {:e} (tolerance {:e})",
                    n, deviation, self.config.tolerance
                );
            }

        for (label, result) in [("sequential", &sequential), ("concurrent", &concurrent)] {
            if let Err(e) = result {
                log::warn!("size {}: {} solver: {}", n, label, e);
            }
        }

        let outcome = Outcome::from_results(&sequential, &concurrent);
        let record = BenchmarkRecord::new(n, seq_time, par_time, outcome).with_deviation(max_deviation);

        log::info!(
            "Seq: {:.3} sec | Par: {:.3} sec | Speedup: {:.2} | {}",
            record.seq_time, record.par_time, record.speedup, record.outcome
        );

        record
    }
}
