//! Sequential vs concurrent benchmark
//!
//! - **`generator`**: seeded random systems ([`SystemGenerator`])
//! - **`record`**: per-size results ([`BenchmarkRecord`], [`Outcome`]) and the
//!   [`RecordSink`] seam
//! - **`runner`**: the driver loop ([`BenchmarkRunner`])
//!
//! # Example
//!
//! ```rust
//! use cramer_rs::benchmark::{BenchmarkConfig, BenchmarkRecord, BenchmarkRunner};
//!
//! let runner = BenchmarkRunner::new(BenchmarkConfig::new(vec![3, 4], 42)).unwrap();
//! let mut records: Vec<BenchmarkRecord> = Vec::new();
//! runner.run(&mut records).unwrap();
//!
//! assert_eq!(records.len(), 2);
//! ```

pub mod generator;
pub mod record;
pub mod runner;

pub use generator::{SystemGenerator, DEFAULT_VALUE_RANGE};
pub use record::{speedup, BenchmarkRecord, Outcome, RecordSink};
pub use runner::{BenchmarkConfig, BenchmarkError, BenchmarkRunner, DEFAULT_TOLERANCE};
