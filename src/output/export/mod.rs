//! Export module for benchmark records.
//!
//! # Architecture
//!
//! The [`Exporter`] trait abstracts the export format. Each format lives in its
//! own sub-module. Streaming during a run goes through
//! [`RecordSink`](crate::benchmark::RecordSink) instead, which
//! [`CsvRecordWriter`] also implements.
//!
//! # Usage example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use cramer_rs::benchmark::{BenchmarkRecord, Outcome};
//! use cramer_rs::output::export::{CsvExporter, Exporter};
//!
//! let records = vec![BenchmarkRecord::new(100, 0.8, 0.2, Outcome::Solved)];
//! CsvExporter::default().export(&records, Path::new("results.csv"))?;
//! # Ok::<(), cramer_rs::output::export::CsvError>(())
//! ```

pub mod csv;

pub use csv::{export_records_csv, CsvConfig, CsvError, CsvMetadata, CsvRecordWriter};

use std::path::Path;

use crate::benchmark::BenchmarkRecord;

/// Abstraction trait for all export formats.
///
/// Each format manages its own errors via the associated type.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Writes every record to `path`, replacing any existing file.
    fn export(&self, records: &[BenchmarkRecord], path: &Path) -> Result<(), Self::Error>;
}

/// CSV implementation of [`Exporter`]
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }
}

impl Exporter for CsvExporter {
    type Error = CsvError;

    fn export(&self, records: &[BenchmarkRecord], path: &Path) -> Result<(), CsvError> {
        export_records_csv(records, path, Some(&self.config))
    }
}
