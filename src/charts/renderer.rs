//! Static Chart Renderer
//! Writes the four analysis charts as fixed-size PNG images.
//!
//! Charts:
//! 1. Line: sepal length over row index
//! 2. Bar: mean petal length per species
//! 3. Histogram: sepal width distribution with KDE overlay
//! 4. Scatter: sepal length vs petal length, colored per species

use polars::prelude::*;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

use crate::data::{DatasetLoader, FEATURE_COLUMNS, TARGET_COLUMN};
use crate::stats::StatsCalculator;

const SEPAL_LENGTH: &str = FEATURE_COLUMNS[0];
const SEPAL_WIDTH: &str = FEATURE_COLUMNS[1];
const PETAL_LENGTH: &str = FEATURE_COLUMNS[2];

/// Output directory for rendered charts.
pub const PLOTS_DIR: &str = "plots";

pub const LINE_CHART_FILE: &str = "line_plot.png";
pub const BAR_CHART_FILE: &str = "bar_chart.png";
pub const HISTOGRAM_FILE: &str = "histogram.png";
pub const SCATTER_CHART_FILE: &str = "scatter_plot.png";

/// Every file a successful render produces.
pub const CHART_FILES: [&str; 4] = [
    LINE_CHART_FILE,
    BAR_CHART_FILE,
    HISTOGRAM_FILE,
    SCATTER_CHART_FILE,
];

/// Figure size in pixels for all charts.
const FIGURE_SIZE: (u32, u32) = (800, 500);

/// Histogram bin count over the observed range.
const HISTOGRAM_BINS: usize = 20;

// Colors
const LINE_COLOR: RGBColor = RGBColor(52, 152, 219); // Blue
const KDE_COLOR: RGBColor = RGBColor(243, 156, 18); // Orange

/// Per-species color palette.
const PALETTE: [RGBColor; 3] = [
    RGBColor(231, 76, 60),  // Red
    RGBColor(46, 204, 113), // Green
    RGBColor(155, 89, 182), // Purple
];

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to render chart: {0}")]
    RenderError(String),
}

fn render_err(e: impl std::fmt::Display) -> ChartError {
    ChartError::RenderError(e.to_string())
}

/// Renders the four static analysis charts.
pub struct ChartRenderer;

impl ChartRenderer {
    /// Render all charts into `out_dir`, creating it if absent.
    /// Existing files are overwritten.
    pub fn render_all(df: &DataFrame, out_dir: &Path) -> Result<(), ChartError> {
        std::fs::create_dir_all(out_dir)?;

        // Row index column used only for the line chart's x-axis.
        let indexed = df.with_row_index("index".into(), None)?;

        Self::render_line_chart(&indexed, &out_dir.join(LINE_CHART_FILE))?;
        Self::render_bar_chart(df, &out_dir.join(BAR_CHART_FILE))?;
        Self::render_histogram(df, &out_dir.join(HISTOGRAM_FILE))?;
        Self::render_scatter_plot(df, &out_dir.join(SCATTER_CHART_FILE))?;

        Ok(())
    }

    /// Sepal length over row index, one connected line in insertion order.
    fn render_line_chart(df: &DataFrame, path: &Path) -> Result<(), ChartError> {
        let xs = StatsCalculator::column_values(df, "index")?;
        let ys = StatsCalculator::column_values(df, SEPAL_LENGTH)?;
        let (y_lo, y_hi) = Self::value_range(&ys);
        let x_max = xs.last().copied().unwrap_or(1.0);

        let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Line Chart: Sepal Length Over Index", ("sans-serif", 22))
            .margin(10)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(0f64..x_max, y_lo..y_hi)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc("Index")
            .y_desc("Sepal Length (cm)")
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(LineSeries::new(
                xs.iter().zip(ys.iter()).map(|(&x, &y)| (x, y)),
                &LINE_COLOR,
            ))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }

    /// One bar per species: mean petal length for that group.
    fn render_bar_chart(df: &DataFrame, path: &Path) -> Result<(), ChartError> {
        let grouped = StatsCalculator::grouped_means(df)?;
        let labels = StatsCalculator::column_values(&grouped, TARGET_COLUMN)?;
        let means = StatsCalculator::column_values(&grouped, PETAL_LENGTH)?;
        let y_max = means.iter().copied().fold(0.0, f64::max) * 1.15;

        let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Bar Chart: Avg Petal Length by Species", ("sans-serif", 22))
            .margin(10)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d((0u32..labels.len() as u32).into_segmented(), 0f64..y_max)
            .map_err(render_err)?;

        let tick_labels = labels.clone();
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Species (target)")
            .y_desc("Average Petal Length (cm)")
            .x_label_formatter(&move |seg| match seg {
                SegmentValue::CenterOf(i) => tick_labels
                    .get(*i as usize)
                    .map(|v| format!("{:.0}", v))
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(means.iter().enumerate().map(|(i, &mean)| {
                let color = PALETTE[i % PALETTE.len()];
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(i as u32), 0.0),
                        (SegmentValue::Exact(i as u32 + 1), mean),
                    ],
                    color.filled(),
                );
                bar.set_margin(0, 0, 20, 20);
                bar
            }))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }

    /// Sepal width distribution in fixed-width bins with a KDE overlay
    /// drawn in count space.
    fn render_histogram(df: &DataFrame, path: &Path) -> Result<(), ChartError> {
        let values = StatsCalculator::column_values(df, SEPAL_WIDTH)?;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let bin_width = (max - min) / HISTOGRAM_BINS as f64;

        let mut counts = vec![0u32; HISTOGRAM_BINS];
        for &v in &values {
            let bin = (((v - min) / bin_width) as usize).min(HISTOGRAM_BINS - 1);
            counts[bin] += 1;
        }
        let y_max = counts.iter().copied().max().unwrap_or(0) as f64 * 1.2;

        let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Histogram: Sepal Width Distribution", ("sans-serif", 22))
            .margin(10)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(min..max, 0f64..y_max)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc("Sepal Width (cm)")
            .y_desc("Frequency")
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(counts.iter().enumerate().map(|(i, &count)| {
                let x0 = min + i as f64 * bin_width;
                Rectangle::new(
                    [(x0, 0.0), (x0 + bin_width, count as f64)],
                    LINE_COLOR.mix(0.6).filled(),
                )
            }))
            .map_err(render_err)?;

        // Density scaled by n * bin_width so the curve overlays the counts.
        let scale = values.len() as f64 * bin_width;
        let kde = StatsCalculator::gaussian_kde(&values, 200);
        chart
            .draw_series(LineSeries::new(
                kde.iter().map(|&(x, d)| (x, d * scale)),
                KDE_COLOR.stroke_width(2),
            ))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }

    /// Sepal length vs petal length, one point per row, colored per species,
    /// with a legend mapping colors to label values.
    fn render_scatter_plot(df: &DataFrame, path: &Path) -> Result<(), ChartError> {
        let all_x = StatsCalculator::column_values(df, SEPAL_LENGTH)?;
        let all_y = StatsCalculator::column_values(df, PETAL_LENGTH)?;
        let (x_lo, x_hi) = Self::value_range(&all_x);
        let (y_lo, y_hi) = Self::value_range(&all_y);

        let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                "Scatter Plot: Sepal Length vs Petal Length",
                ("sans-serif", 22),
            )
            .margin(10)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc("Sepal Length (cm)")
            .y_desc("Petal Length (cm)")
            .draw()
            .map_err(render_err)?;

        for (i, label) in DatasetLoader::label_values(df).iter().enumerate() {
            let group = df
                .clone()
                .lazy()
                .filter(col(TARGET_COLUMN).eq(lit(*label)))
                .collect()?;
            let xs = StatsCalculator::column_values(&group, SEPAL_LENGTH)?;
            let ys = StatsCalculator::column_values(&group, PETAL_LENGTH)?;
            let color = PALETTE[i % PALETTE.len()];

            chart
                .draw_series(
                    xs.iter()
                        .zip(ys.iter())
                        .map(|(&x, &y)| Circle::new((x, y), 3, color.filled())),
                )
                .map_err(render_err)?
                .label(label.to_string())
                .legend(move |(x, y)| Circle::new((x, y), 3, color.filled()));
        }

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }

    /// Padded min/max range for an axis.
    fn value_range(values: &[f64]) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in values {
            if !v.is_nan() {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if min.is_infinite() {
            return (0.0, 1.0);
        }
        let pad = (max - min) * 0.1;
        (min - pad, max + pad)
    }
}
