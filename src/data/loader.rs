//! Dataset Loader Module
//! Materializes the embedded iris reference data as a Polars DataFrame.

use polars::prelude::*;
use std::io::Cursor;
use thiserror::Error;

/// The iris reference dataset, embedded at compile time.
/// 150 rows: four measurements in centimeters plus an integer class label.
const IRIS_CSV: &str = include_str!("iris.csv");

/// Numeric feature columns, in schema order.
pub const FEATURE_COLUMNS: [&str; 4] = [
    "sepal length (cm)",
    "sepal width (cm)",
    "petal length (cm)",
    "petal width (cm)",
];

/// Categorical class label column (values 0, 1, 2).
pub const TARGET_COLUMN: &str = "target";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to parse dataset: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Dataset is missing expected column '{0}'")]
    MissingColumn(String),
}

/// Loads the embedded reference dataset.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Parse the embedded CSV into a DataFrame and validate its schema.
    pub fn load() -> Result<DataFrame, LoaderError> {
        Self::from_csv(IRIS_CSV.as_bytes())
    }

    /// Parse CSV bytes into a DataFrame with the expected column layout.
    pub fn from_csv(bytes: &[u8]) -> Result<DataFrame, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        for expected in FEATURE_COLUMNS.iter().chain([TARGET_COLUMN].iter()) {
            if df.column(expected).is_err() {
                return Err(LoaderError::MissingColumn(expected.to_string()));
            }
        }

        Ok(df)
    }

    /// Get list of numeric column names.
    pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
        df.get_columns()
            .iter()
            .filter(|col| {
                matches!(
                    col.dtype(),
                    DataType::Float32
                        | DataType::Float64
                        | DataType::Int8
                        | DataType::Int16
                        | DataType::Int32
                        | DataType::Int64
                        | DataType::UInt8
                        | DataType::UInt16
                        | DataType::UInt32
                        | DataType::UInt64
                )
            })
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Distinct label values from the target column, ascending.
    pub fn label_values(df: &DataFrame) -> Vec<i64> {
        df.column(TARGET_COLUMN)
            .ok()
            .and_then(|col| col.unique().ok())
            .and_then(|unique| unique.cast(&DataType::Int64).ok())
            .map(|unique| {
                let mut labels: Vec<i64> = unique
                    .as_materialized_series()
                    .i64()
                    .map(|ca| ca.into_iter().flatten().collect())
                    .unwrap_or_default();
                labels.sort_unstable();
                labels
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_dataset_has_expected_shape() {
        let df = DatasetLoader::load().unwrap();
        assert_eq!(df.shape(), (150, 5));
    }

    #[test]
    fn reference_dataset_has_four_numeric_features() {
        let df = DatasetLoader::load().unwrap();
        let numeric = DatasetLoader::numeric_columns(&df);
        for feature in FEATURE_COLUMNS {
            assert!(numeric.contains(&feature.to_string()));
        }
        // target parses as an integer column, so it counts as numeric too
        assert_eq!(numeric.len(), 5);
    }

    #[test]
    fn label_values_are_three_classes() {
        let df = DatasetLoader::load().unwrap();
        assert_eq!(DatasetLoader::label_values(&df), vec![0, 1, 2]);
    }

    #[test]
    fn ragged_csv_is_an_error() {
        let result = DatasetLoader::from_csv(b"a,b\n1,2\n3,4,5\n");
        assert!(result.is_err());
    }

    #[test]
    fn missing_target_column_is_an_error() {
        let result = DatasetLoader::from_csv(b"a,b\n1,2\n");
        assert!(matches!(result, Err(LoaderError::MissingColumn(_))));
    }
}
