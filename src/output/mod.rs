//! Output module for benchmark results
//!
//! - **Export**: CSV files, written row by row during a run
//! - **Visualization**: PNG/SVG charts using plotters (feature `plot`)
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── export/             ← Data export
//! │   ├── mod.rs
//! │   └── csv.rs
//! └── visualization/      ← Charts (feature `plot`)
//!     ├── mod.rs
//!     ├── config.rs
//!     └── benchmark_plots.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cramer_rs::benchmark::{BenchmarkConfig, BenchmarkRunner};
//! use cramer_rs::output::export::{CsvConfig, CsvRecordWriter};
//!
//! let runner = BenchmarkRunner::new(BenchmarkConfig::new(vec![50, 100], 42))?;
//! let mut writer = CsvRecordWriter::create("results.csv", CsvConfig::default())?;
//! runner.run(&mut writer)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod export;
#[cfg(feature = "plot")]
pub mod visualization;

pub use export::{export_records_csv, CsvConfig, CsvError, CsvExporter, CsvRecordWriter, Exporter};

#[cfg(feature = "plot")]
pub use visualization::{plot_speedup_vs_size, plot_time_vs_size, PlotConfig};
