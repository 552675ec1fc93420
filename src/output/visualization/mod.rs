//! Visualization of benchmark results
//!
//! Requires the `plot` feature.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **benchmark_plots**: Time and speedup against matrix size
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use cramer_rs::output::visualization::{plot_time_vs_size, PlotConfig};
//!
//! let records = runner.run(&mut writer)?;
//!
//! // Default config
//! plot_time_vs_size(&records, "time_vs_size.png", None)?;
//!
//! // Or with a custom title
//! let config = PlotConfig::time_vs_size("Cramer, 8 threads");
//! plot_time_vs_size(&records, "time_vs_size.svg", Some(&config))?;
//! ```

pub mod benchmark_plots;
pub mod config;

pub use benchmark_plots::{plot_speedup_vs_size, plot_time_vs_size};
pub use config::{IntoOptionalTitle, PlotConfig, NO_TITLE};
