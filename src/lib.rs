//! Iris Insight - exploratory analysis of the iris reference dataset.
//!
//! A linear four-stage pipeline: load the embedded dataset, print
//! exploratory diagnostics, compute descriptive statistics and grouped
//! means, and render four static chart images.

pub mod charts;
pub mod data;
pub mod stats;

use std::path::Path;

use polars::prelude::DataFrame;

use charts::ChartRenderer;
use data::{DataExplorer, LoaderError};
use stats::StatsCalculator;

/// Run the analysis pipeline against a loader result.
///
/// A failed load logs a diagnostic and aborts the run before any later
/// stage executes, so no chart files are written and the output directory
/// is never created. Errors in later stages propagate to the caller.
pub fn run(
    load_result: Result<DataFrame, LoaderError>,
    out_dir: &Path,
) -> anyhow::Result<()> {
    let df = match load_result {
        Ok(df) => df,
        Err(e) => {
            log::error!("error loading dataset: {e}");
            return Ok(());
        }
    };
    log::info!("dataset loaded: {} rows", df.height());

    DataExplorer::summarize(&df);

    println!("\nCleaning data (dropping rows with missing values)...");
    let cleaned = DataExplorer::drop_missing(&df)?;
    log::info!("cleaned table: {} rows", cleaned.height());

    println!("\nStatistical summary:");
    let summaries = StatsCalculator::describe(&cleaned)?;
    StatsCalculator::print_describe(&summaries);

    println!("\nMean of numeric columns grouped by species:");
    let grouped = StatsCalculator::grouped_means(&cleaned)?;
    println!("{grouped}");

    ChartRenderer::render_all(&cleaned, out_dir)?;
    println!("\nVisualizations saved to '{}'.", out_dir.display());

    println!("\nAnalysis complete. Check the plots and summary above.");
    Ok(())
}
