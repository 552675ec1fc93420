//! Benchmark charts
//!
//! - [`plot_time_vs_size`]: sequential and concurrent wall time against `n`
//! - [`plot_speedup_vs_size`]: `seq_time / par_time` against `n`
//!
//! Only records whose outcome is `Solved` are drawn; a singular system or a
//! failed concurrent run carries no meaningful timing. The backend is chosen
//! from the file extension: `.svg` for vector output, anything else bitmap.
//!
//! ```rust,ignore
//! use cramer_rs::output::visualization::{plot_speedup_vs_size, plot_time_vs_size};
//!
//! plot_time_vs_size(&records, "time_vs_size.png", None)?;
//! plot_speedup_vs_size(&records, "speedup_vs_size.png", None)?;
//! ```

use std::error::Error;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::config::{PlotConfig, NO_TITLE};
use crate::benchmark::BenchmarkRecord;

/// One named curve
struct Series<'a> {
    label: &'a str,
    points: Vec<(f64, f64)>,
}

/// Solved records as `(size, value)` points
fn solved_points(records: &[BenchmarkRecord], value: impl Fn(&BenchmarkRecord) -> f64) -> Vec<(f64, f64)> {
    records
        .iter()
        .filter(|r| r.is_solved())
        .map(|r| (r.size as f64, value(r)))
        .collect()
}

// =================================================================================================
// Public API
// =================================================================================================

/// Plot sequential and concurrent times against matrix size
///
/// # Errors
///
/// Returns `Err` when no record is solved or the backend cannot write to
/// `output_path`.
pub fn plot_time_vs_size<P: AsRef<Path>>(
    records: &[BenchmarkRecord],
    output_path: P,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::time_vs_size(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let series = [
        Series { label: "Sequential", points: solved_points(records, |r| r.seq_time) },
        Series { label: "Concurrent", points: solved_points(records, |r| r.par_time) },
    ];

    render(output_path.as_ref(), &series, config)
}

/// Plot the speedup against matrix size
///
/// # Errors
///
/// Returns `Err` when no record is solved or the backend cannot write to
/// `output_path`.
pub fn plot_speedup_vs_size<P: AsRef<Path>>(
    records: &[BenchmarkRecord],
    output_path: P,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::speedup_vs_size(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let series = [Series { label: "Speedup", points: solved_points(records, |r| r.speedup) }];

    render(output_path.as_ref(), &series, config)
}

// =================================================================================================
// Rendering
// =================================================================================================

fn render(output_path: &Path, series: &[Series<'_>], config: &PlotConfig) -> Result<(), Box<dyn Error>> {
    if series.iter().all(|s| s.points.is_empty()) {
        return Err(format!("no solved records to plot into {}", output_path.display()).into());
    }

    let ext = output_path.extension().and_then(|s| s.to_str()).unwrap_or("png");

    match ext {
        "svg" => {
            let root = SVGBackend::new(output_path, (config.width, config.height)).into_drawing_area();
            draw(root, series, config)
        }
        _ => {
            let root = BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
            draw(root, series, config)
        }
    }
}

fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    series: &[Series<'_>],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&config.background)?;

    let all_points = series.iter().flat_map(|s| s.points.iter());
    let (min_x, max_x, max_y) = all_points.fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        |(lo, hi, top), &(x, y)| (lo.min(x), hi.max(x), top.max(y)),
    );
    // A single size still needs a non-empty x range
    let (min_x, max_x) = if max_x > min_x { (min_x, max_x) } else { (min_x - 1.0, max_x + 1.0) };
    let max_y = max_y.max(1e-9);

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(min_x..max_x, 0.0..(max_y * 1.1))?;

    let x_format = |x: &f64| format!("{:.0}", x);
    let y_format = |y: &f64| format!("{:.3}", y);

    // Axis labels and descriptions are drawn even without grid lines.
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .x_label_formatter(&x_format)
        .y_label_formatter(&y_format);
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    for (index, s) in series.iter().enumerate() {
        let color = if series.len() == 1 { config.line_color } else { config.get_series_color(index) };
        let style = ShapeStyle::from(&color).stroke_width(config.line_width);

        chart
            .draw_series(LineSeries::new(s.points.iter().copied(), style))?
            .label(s.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

        chart.draw_series(s.points.iter().map(|&p| Circle::new(p, 4, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .background_style(config.background.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::Outcome;

    fn records() -> Vec<BenchmarkRecord> {
        vec![
            BenchmarkRecord::new(50, 0.01, 0.02, Outcome::Solved),
            BenchmarkRecord::new(100, 0.20, 0.08, Outcome::Solved),
            BenchmarkRecord::new(150, 0.05, 0.0, Outcome::NoSolution),
            BenchmarkRecord::new(200, 1.60, 0.35, Outcome::Solved),
        ]
    }

    #[test]
    fn test_solved_points_skip_other_outcomes() {
        let points = solved_points(&records(), |r| r.seq_time);
        let sizes: Vec<f64> = points.iter().map(|p| p.0).collect();
        assert_eq!(sizes, vec![50.0, 100.0, 200.0]);
    }

    #[test]
    fn test_nothing_solved_is_an_error() {
        let records = vec![BenchmarkRecord::new(10, 0.1, 0.0, Outcome::Timeout)];
        let tmp = tempfile::tempdir().unwrap();
        let result = plot_speedup_vs_size(&records, tmp.path().join("speedup.svg"), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_plot_time_svg() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("time_vs_size.svg");
        plot_time_vs_size(&records(), &path, None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_without_grid_keeps_axis_labels() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("no_grid.svg");
        let config = PlotConfig { show_grid: false, ..PlotConfig::time_vs_size(NO_TITLE) };

        plot_time_vs_size(&records(), &path, Some(&config)).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains(&config.xlabel));
        assert!(svg.contains(&config.ylabel));
    }

    #[test]
    fn test_plot_speedup_png() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("speedup_vs_size.png");
        plot_speedup_vs_size(&records(), &path, None).unwrap();
        assert!(path.exists());
    }
}
