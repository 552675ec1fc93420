//! One benchmark row per matrix size

use std::convert::Infallible;
use std::fmt;

use crate::solver::{Solution, SolveError};

/// How a size iteration ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Both solvers produced a complete vector
    Solved,
    /// `det(A)` reported as zero
    NoSolution,
    /// The concurrent barrier deadline elapsed
    Timeout,
    /// A concurrent worker failed
    Incomplete,
    /// Any other solver error
    Failed,
}

impl Outcome {
    /// Label written to the `outcome` CSV column
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Solved => "solved",
            Outcome::NoSolution => "no_solution",
            Outcome::Timeout => "timeout",
            Outcome::Incomplete => "incomplete",
            Outcome::Failed => "failed",
        }
    }

    /// Outcome matching a solver error
    pub fn from_error(error: &SolveError) -> Self {
        match error {
            SolveError::NoSolution { .. } => Outcome::NoSolution,
            SolveError::Timeout(_) => Outcome::Timeout,
            SolveError::IncompleteAggregation(_) => Outcome::Incomplete,
            SolveError::InvalidConfiguration(_) | SolveError::InvalidSystem(_) => Outcome::Failed,
        }
    }

    /// Combine both solver results; the sequential error wins when both failed
    pub fn from_results(
        sequential: &Result<Solution, SolveError>,
        concurrent: &Result<Solution, SolveError>,
    ) -> Self {
        match (sequential, concurrent) {
            (Ok(_), Ok(_)) => Outcome::Solved,
            (Err(e), _) | (Ok(_), Err(e)) => Outcome::from_error(e),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Timing of both strategies for one size
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRecord {
    pub size: usize,
    /// Sequential wall time (seconds)
    pub seq_time: f64,
    /// Concurrent wall time (seconds)
    pub par_time: f64,
    /// `seq_time / par_time`, or 0 when `par_time <= 0`
    pub speedup: f64,
    pub outcome: Outcome,
    /// Largest |X_seq[i] - X_par[i]|, when both solved
    pub max_deviation: Option<f64>,
}

impl BenchmarkRecord {
    /// Build a record, deriving the speedup
    pub fn new(size: usize, seq_time: f64, par_time: f64, outcome: Outcome) -> Self {
        Self {
            size,
            seq_time,
            par_time,
            speedup: speedup(seq_time, par_time),
            outcome,
            max_deviation: None,
        }
    }

    /// Builder pattern: attach the solver deviation
    pub fn with_deviation(mut self, max_deviation: Option<f64>) -> Self {
        self.max_deviation = max_deviation;
        self
    }

    /// True when both solvers produced a vector
    pub fn is_solved(&self) -> bool {
        self.outcome == Outcome::Solved
    }
}

/// `seq / par`, or 0 when `par` is not positive
pub fn speedup(seq_time: f64, par_time: f64) -> f64 {
    if par_time > 0.0 { seq_time / par_time } else { 0.0 }
}

// =================================================================================================
// Record sinks
// =================================================================================================

/// Destination for records as they are produced
pub trait RecordSink {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist one record
    fn write_record(&mut self, record: &BenchmarkRecord) -> Result<(), Self::Error>;
}

impl RecordSink for Vec<BenchmarkRecord> {
    type Error = Infallible;

    fn write_record(&mut self, record: &BenchmarkRecord) -> Result<(), Infallible> {
        self.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::AggregationReport;
    use nalgebra::DVector;
    use std::time::Duration;

    #[test]
    fn test_speedup() {
        assert_eq!(speedup(4.0, 2.0), 2.0);
        assert_eq!(speedup(4.0, 0.0), 0.0);
        assert_eq!(speedup(4.0, -1.0), 0.0);
    }

    #[test]
    fn test_record_derives_speedup() {
        let record = BenchmarkRecord::new(100, 3.0, 1.5, Outcome::Solved);
        assert_eq!(record.speedup, 2.0);
        assert!(record.is_solved());
        assert_eq!(record.max_deviation, None);
    }

    #[test]
    fn test_outcome_from_results() {
        let solved: Result<Solution, SolveError> = Ok(Solution::new(DVector::zeros(1), 1.0));
        let singular: Result<Solution, SolveError> = Err(SolveError::NoSolution { determinant: 0.0 });
        let timeout: Result<Solution, SolveError> = Err(SolveError::Timeout(AggregationReport {
            expected: 1,
            received: 0,
            missing: vec![0],
            failures: vec![],
            timed_out: true,
            elapsed: Duration::from_millis(1),
        }));

        assert_eq!(Outcome::from_results(&solved, &solved), Outcome::Solved);
        assert_eq!(Outcome::from_results(&singular, &singular), Outcome::NoSolution);
        assert_eq!(Outcome::from_results(&solved, &timeout), Outcome::Timeout);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Outcome::NoSolution.to_string(), "no_solution");
        assert_eq!(Outcome::Incomplete.label(), "incomplete");
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<BenchmarkRecord> = Vec::new();
        sink.write_record(&BenchmarkRecord::new(3, 1.0, 1.0, Outcome::Solved)).unwrap();
        assert_eq!(sink.len(), 1);
    }
}
