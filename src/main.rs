//! `cramer-bench`: times the sequential and concurrent Cramer solvers
//!
//! ```text
//! cramer-bench 50 100 200 --output results.csv --seed 42
//! RUST_LOG=debug cramer-bench 8 16 --backend rayon --max-threads 8 --with-outcome
//! ```

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};

use cramer_rs::benchmark::{BenchmarkConfig, BenchmarkRunner};
use cramer_rs::output::export::{CsvConfig, CsvMetadata, CsvRecordWriter};
use cramer_rs::solver::{SolverConfiguration, WorkerBackend};

/// Sequential vs concurrent Cramer's Rule benchmark
#[derive(Parser, Debug)]
#[command(name = "cramer-bench")]
#[command(about = "Benchmark sequential vs concurrent Cramer's Rule on random systems")]
#[command(version)]
struct Args {
    /// Matrix sizes to benchmark, in order
    #[arg(required = true, num_args = 1.., value_parser = parse_size)]
    sizes: Vec<usize>,

    /// CSV output file
    #[arg(short, long, default_value = "results.csv")]
    output: PathBuf,

    /// Generator seed (default: derived from the clock, and logged)
    #[arg(long)]
    seed: Option<u64>,

    /// Give up on the concurrent barrier after this many seconds
    #[arg(long)]
    timeout_secs: Option<f64>,

    /// Worker execution units for the concurrent solver
    #[arg(long, value_enum, default_value_t = Backend::Threads)]
    backend: Backend,

    /// Pool size for the rayon backend
    #[arg(long)]
    max_threads: Option<usize>,

    /// Append an `outcome` column to the CSV
    #[arg(long)]
    with_outcome: bool,

    /// Write a `#` comment block with run parameters above the header
    #[arg(long)]
    metadata: bool,

    /// Directory for time_vs_size.png and speedup_vs_size.png
    #[cfg(feature = "plot")]
    #[arg(long)]
    plot_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    Threads,
    Rayon,
}

fn parse_size(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("matrix size must be positive".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("'{}' is not a matrix size: {}", value, e)),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    // ====== Step 1: Solver configuration ======

    let backend = worker_backend(args.backend, args.max_threads)?;
    let mut solver = SolverConfiguration::default().with_backend(backend);
    if let Some(secs) = args.timeout_secs {
        let timeout = Duration::try_from_secs_f64(secs)
            .map_err(|e| format!("invalid --timeout-secs {}: {}", secs, e))?;
        solver = solver.with_timeout(timeout);
    }

    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!("seed {} (replay with --seed {})", seed, seed);

    let config = BenchmarkConfig::new(args.sizes, seed).with_solver(solver);
    let runner = BenchmarkRunner::new(config)?;

    // ====== Step 2: Output ======

    let mut csv = CsvConfig::default();
    if args.with_outcome {
        csv = csv.with_outcome();
    }
    if args.metadata {
        let config = runner.config();
        csv = csv.with_metadata(CsvMetadata {
            seed: Some(config.seed),
            value_range: Some((config.value_range.start, config.value_range.end)),
            backend: Some(config.solver.backend.name().to_string()),
            timeout_secs: config.solver.timeout.map(|t| t.as_secs_f64()),
            custom: Vec::new(),
        });
    }

    // ====== Step 3: Run ======

    let mut writer = CsvRecordWriter::create(&args.output, csv)?;
    let records = runner.run(&mut writer)?;
    writer.into_inner()?;

    println!("Results saved to {}", args.output.display());

    #[cfg(feature = "plot")]
    if let Some(dir) = &args.plot_dir {
        use cramer_rs::output::visualization::{plot_speedup_vs_size, plot_time_vs_size};

        std::fs::create_dir_all(dir)?;
        plot_time_vs_size(&records, dir.join("time_vs_size.png"), None)?;
        plot_speedup_vs_size(&records, dir.join("speedup_vs_size.png"), None)?;
        println!("Plots saved to {}", dir.display());
    }

    let solved = records.iter().filter(|r| r.is_solved()).count();
    log::info!("{} of {} size(s) solved", solved, records.len());

    Ok(())
}

fn worker_backend(backend: Backend, max_threads: Option<usize>) -> Result<WorkerBackend, String> {
    match backend {
        Backend::Threads => {
            if max_threads.is_some() {
                log::warn!("--max-threads is ignored by the threads backend");
            }
            Ok(WorkerBackend::Threads)
        }
        #[cfg(feature = "parallel")]
        Backend::Rayon => Ok(WorkerBackend::Rayon { max_threads }),
        #[cfg(not(feature = "parallel"))]
        Backend::Rayon => Err("the rayon backend needs the `parallel` feature".to_string()),
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
