//! Data Explorer Module
//! Prints dataset diagnostics and produces a null-free copy for analysis.

use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Inspects a DataFrame and removes rows with missing values.
pub struct DataExplorer;

impl DataExplorer {
    /// Print a preview of the data, per-column dtypes, and null counts.
    pub fn summarize(df: &DataFrame) {
        let (rows, cols) = df.shape();

        println!("\nFirst 5 rows of the dataset:");
        println!("{}", df.head(Some(5)));

        println!("\nShape: {} rows x {} columns", rows, cols);

        println!("\nColumn types:");
        for col in df.get_columns() {
            println!("  {}: {}", col.name(), col.dtype());
        }

        println!("\nMissing values per column:");
        println!("{}", df.null_count());
    }

    /// Produce a copy with every row containing a null removed.
    ///
    /// The input DataFrame is left untouched; running this on an already
    /// clean table returns it unchanged.
    pub fn drop_missing(df: &DataFrame) -> Result<DataFrame, ExplorerError> {
        let cleaned = df.clone().lazy().drop_nulls(None).collect()?;
        Ok(cleaned)
    }
}
