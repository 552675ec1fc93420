//! Plot configuration shared by the benchmark charts

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// # Fields
///
/// - `width`, `height`: Dimensions in pixels
/// - `title`: Plot title
/// - `xlabel`, `ylabel`: Axis labels
/// - `line_color`: Color of the first (or only) series
/// - `series_colors`: Optional colors, one per series
/// - `background`: Background color
/// - `line_width`: Line thickness in pixels
/// - `show_grid`: Whether to show grid lines
///
/// # Example
///
/// ```rust
/// use cramer_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::speedup_vs_size("Speedup on 8 cores");
/// config.line_color = GREEN;
/// config.width = 1920;
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: "Matrix Size (n)")
    pub xlabel: String,

    /// Y-axis label (default: set by plot type)
    pub ylabel: String,

    /// Line color for single-series plots (default: RED)
    pub line_color: RGBColor,

    /// Optional colors for multi-series plots
    ///
    /// If None, uses default palette: [BLUE, RED, GREEN, ...]
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: "Matrix Size (n)".to_string(),
            ylabel: String::new(),
            line_color: RED,
            series_colors: None,
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Config for execution time vs matrix size
    ///
    /// Title defaults to "Execution Time vs Matrix Size".
    pub fn time_vs_size(title: impl IntoOptionalTitle) -> Self {
        Self {
            ylabel: "Time (seconds)".to_string(),
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Execution Time vs Matrix Size".to_string()),
            ..Self::default()
        }
    }

    /// Config for speedup vs matrix size
    ///
    /// Title defaults to "Speedup vs Matrix Size".
    pub fn speedup_vs_size(title: impl IntoOptionalTitle) -> Self {
        Self {
            ylabel: "Speedup (Seq / Par)".to_string(),
            line_color: GREEN,
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Speedup vs Matrix Size".to_string()),
            ..Self::default()
        }
    }

    /// Get color for series at index i
    pub(crate) fn get_series_color(&self, series_index: usize) -> RGBColor {
        if let Some(colors) = &self.series_colors
            && series_index < colors.len() {
                return colors[series_index];
            }

        const PALETTE: [RGBColor; 6] = [
            BLUE,
            RED,
            GREEN,
            MAGENTA,
            CYAN,
            RGBColor(255, 165, 0), // Orange
        ];

        PALETTE[series_index % PALETTE.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================
