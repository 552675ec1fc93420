//! CSV export of benchmark records
//!
//! # Format
//!
//! ```csv
//! size,seq_time,par_time,speedup
//! 200,0.41230,0.09876,4.17
//! 400,6.50211,1.30040,5.00
//! ```
//!
//! Times are written with 5 decimals and the speedup with 2, one row per
//! size, header first. Two optional additions:
//!
//! - an `outcome` column (`solved`, `no_solution`, `timeout`, ...)
//! - a `#`-prefixed metadata block above the header
//!
//! ```csv
//! # Cramer's Rule Benchmark
//! # Generated: 2026-10-19T09:12:44+00:00
//! # Seed: 42
//! # Value Range: [0, 10)
//! # Backend: threads
//! #
//! size,seq_time,par_time,speedup,outcome
//! 3,0.00001,0.00021,0.05,solved
//! ```
//!
//! # Streaming
//!
//! [`CsvRecordWriter`] writes the header when it is created and flushes after
//! every record, so rows already benchmarked survive an interrupted run.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::benchmark::{BenchmarkRecord, RecordSink};

// =============================================================================
// Errors
// =============================================================================

/// CSV export failure
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid record for size {size}: {reason}")]
    InvalidRecord { size: usize, reason: String },
}

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use cramer_rs::output::export::CsvConfig;
///
/// let config = CsvConfig::default().delimiter(';').with_outcome();
/// assert_eq!(config.delimiter, ';');
/// assert!(config.include_outcome);
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Decimal places for the two time columns (default: 5)
    pub time_precision: usize,

    /// Decimal places for the speedup column (default: 2)
    pub speedup_precision: usize,

    /// Append an `outcome` column (default: false)
    pub include_outcome: bool,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            time_precision: 5,
            speedup_precision: 2,
            include_outcome: false,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// Semicolon delimiter with comma decimals
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: add the outcome column
    pub fn with_outcome(mut self) -> Self {
        self.include_outcome = true;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only fields that are set are written.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    /// Generator seed
    pub seed: Option<u64>,

    /// Generator value range as `(start, end)`, end excluded
    pub value_range: Option<(i32, i32)>,

    /// Worker backend name
    pub backend: Option<String>,

    /// Aggregation deadline in seconds
    pub timeout_secs: Option<f64>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Add custom parameter
    pub fn add_custom(&mut self, key: String, value: String) {
        self.custom.push((key, value));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header<W: Write>(writer: &mut W, metadata: &CsvMetadata) -> io::Result<()> {
    writeln!(writer, "# Cramer's Rule Benchmark")?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(seed) = metadata.seed {
        writeln!(writer, "# Seed: {}", seed)?;
    }
    if let Some((start, end)) = metadata.value_range {
        writeln!(writer, "# Value Range: [{}, {})", start, end)?;
    }
    if let Some(backend) = &metadata.backend {
        writeln!(writer, "# Backend: {}", backend)?;
    }
    if let Some(timeout) = metadata.timeout_secs {
        writeln!(writer, "# Timeout: {} s", timeout)?;
    }
    for (key, value) in &metadata.custom {
        writeln!(writer, "# {}: {}", key, value)?;
    }

    writeln!(writer, "#")
}

fn format_number(value: f64, precision: usize, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn validate_record(record: &BenchmarkRecord) -> Result<(), CsvError> {
    for (name, value) in [
        ("seq_time", record.seq_time),
        ("par_time", record.par_time),
        ("speedup", record.speedup),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(CsvError::InvalidRecord {
                size: record.size,
                reason: format!("{} = {} is not a finite non-negative number", name, value),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Streaming writer
// =============================================================================

/// Writes records one at a time
pub struct CsvRecordWriter<W: Write> {
    writer: W,
    config: CsvConfig,
    rows: usize,
}

impl CsvRecordWriter<BufWriter<File>> {
    /// Create (or truncate) the file at `path` and write the header
    pub fn create<P: AsRef<Path>>(path: P, config: CsvConfig) -> Result<Self, CsvError> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file), config)
    }
}

impl<W: Write> CsvRecordWriter<W> {
    /// Wrap a writer and write metadata and header
    pub fn new(mut writer: W, config: CsvConfig) -> Result<Self, CsvError> {
        if config.include_metadata
            && let Some(metadata) = &config.metadata {
                write_metadata_header(&mut writer, metadata)?;
            }

        let d = config.delimiter;
        write!(writer, "size{d}seq_time{d}par_time{d}speedup")?;
        if config.include_outcome {
            write!(writer, "{d}outcome")?;
        }
        writeln!(writer)?;
        writer.flush()?;

        Ok(Self { writer, config, rows: 0 })
    }

    /// Append one row
    pub fn write(&mut self, record: &BenchmarkRecord) -> Result<(), CsvError> {
        validate_record(record)?;

        let config = &self.config;
        let d = config.delimiter;
        write!(
            self.writer,
            "{}{d}{}{d}{}{d}{}",
            record.size,
            format_number(record.seq_time, config.time_precision, config),
            format_number(record.par_time, config.time_precision, config),
            format_number(record.speedup, config.speedup_precision, config),
        )?;
        if config.include_outcome {
            write!(self.writer, "{d}{}", record.outcome.label())?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;

        self.rows += 1;
        Ok(())
    }

    /// Number of data rows written
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and return the inner writer
    pub fn into_inner(mut self) -> Result<W, CsvError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> RecordSink for CsvRecordWriter<W> {
    type Error = CsvError;

    fn write_record(&mut self, record: &BenchmarkRecord) -> Result<(), CsvError> {
        self.write(record)
    }
}

// =============================================================================
// Export Functions
// =============================================================================

/// Write every record to `output_path`
///
/// # Errors
///
/// - a record with a negative or non-finite time or speedup
/// - file creation or write errors
pub fn export_records_csv<P: AsRef<Path>>(
    records: &[BenchmarkRecord],
    output_path: P,
    configuration: Option<&CsvConfig>,
) -> Result<(), CsvError> {
    for record in records {
        validate_record(record)?;
    }

    let configuration = configuration.cloned().unwrap_or_default();
    let mut writer = CsvRecordWriter::create(output_path, configuration)?;
    for record in records {
        writer.write(record)?;
    }
    writer.into_inner()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::Outcome;
    use std::fs;
    use tempfile::NamedTempFile;

    fn records() -> Vec<BenchmarkRecord> {
        vec![
            BenchmarkRecord::new(200, 0.4123, 0.09876, Outcome::Solved),
            BenchmarkRecord::new(400, 6.502114, 1.3004, Outcome::NoSolution),
        ]
    }

    fn written(config: CsvConfig) -> String {
        let mut writer = CsvRecordWriter::new(Vec::new(), config).unwrap();
        for record in records() {
            writer.write(&record).unwrap();
        }
        assert_eq!(writer.rows(), 2);
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_default_format() {
        let content = written(CsvConfig::default());
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "size,seq_time,par_time,speedup");
        assert_eq!(lines[1], "200,0.41230,0.09876,4.17");
        assert_eq!(lines[2], "400,6.50211,1.30040,5.00");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_outcome_column() {
        let content = written(CsvConfig::default().with_outcome());
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "size,seq_time,par_time,speedup,outcome");
        assert!(lines[1].ends_with(",solved"));
        assert!(lines[2].ends_with(",no_solution"));
    }

    #[test]
    fn test_european_format() {
        let content = written(CsvConfig::european());
        assert!(content.contains("200;0,41230;0,09876;4,17"));
    }

    #[test]
    fn test_metadata_header() {
        let mut metadata = CsvMetadata {
            seed: Some(42),
            value_range: Some((0, 10)),
            backend: Some("threads".to_string()),
            ..Default::default()
        };
        metadata.add_custom("Host".to_string(), "ci".to_string());

        let content = written(CsvConfig::default().with_metadata(metadata));

        assert!(content.starts_with("# Cramer's Rule Benchmark"));
        assert!(content.contains("# Seed: 42"));
        assert!(content.contains("# Value Range: [0, 10)"));
        assert!(content.contains("# Host: ci"));
        let header = content.lines().find(|l| !l.starts_with('#')).unwrap();
        assert_eq!(header, "size,seq_time,par_time,speedup");
    }

    #[test]
    fn test_rejects_non_finite_time() {
        let mut writer = CsvRecordWriter::new(Vec::new(), CsvConfig::default()).unwrap();
        let record = BenchmarkRecord::new(3, f64::NAN, 1.0, Outcome::Solved);
        assert!(matches!(writer.write(&record), Err(CsvError::InvalidRecord { size: 3, .. })));
        assert_eq!(writer.rows(), 0);
    }

    #[test]
    fn test_export_to_file() {
        let file = NamedTempFile::new().unwrap();
        export_records_csv(&records(), file.path(), None).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_export_invalid_path() {
        let result = export_records_csv(&records(), "/nonexistent/dir/results.csv", None);
        assert!(matches!(result, Err(CsvError::Io(_))));
    }
}
