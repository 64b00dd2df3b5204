//! Statistics Calculator Module
//! Descriptive statistics, grouped means, and kernel density estimation.

use polars::prelude::*;
use statrs::distribution::{Continuous, Normal};

use crate::data::{DatasetLoader, TARGET_COLUMN};

/// Descriptive statistics for a single numeric column.
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Default for ColumnSummary {
    fn default() -> Self {
        Self {
            name: String::new(),
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            median: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Handles the statistical computations of the analysis stage.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Non-null values of a column as f64.
    pub fn column_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<f64>> {
        let col = df.column(name)?;
        let values = col.cast(&DataType::Float64)?;
        let ca = values.f64()?;
        Ok(ca.into_iter().flatten().filter(|v| !v.is_nan()).collect())
    }

    /// Compute descriptive statistics for an array of values.
    pub fn compute_summary(name: &str, values: &[f64]) -> ColumnSummary {
        let n = values.len();
        if n == 0 {
            return ColumnSummary {
                name: name.to_string(),
                ..ColumnSummary::default()
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = values.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        ColumnSummary {
            name: name.to_string(),
            count: n,
            mean,
            std: variance.sqrt(),
            min: sorted[0],
            q25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            q75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Descriptive statistics for every numeric column, in schema order.
    pub fn describe(df: &DataFrame) -> PolarsResult<Vec<ColumnSummary>> {
        let mut summaries = Vec::new();
        for name in DatasetLoader::numeric_columns(df) {
            let values = Self::column_values(df, &name)?;
            summaries.push(Self::compute_summary(&name, &values));
        }
        Ok(summaries)
    }

    /// Print descriptive statistics as a fixed-width table.
    pub fn print_describe(summaries: &[ColumnSummary]) {
        println!(
            "{:<20} {:>7} {:>9} {:>9} {:>8} {:>8} {:>8} {:>8} {:>8}",
            "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
        );
        for s in summaries {
            println!(
                "{:<20} {:>7} {:>9.4} {:>9.4} {:>8.3} {:>8.3} {:>8.3} {:>8.3} {:>8.3}",
                s.name, s.count, s.mean, s.std, s.min, s.q25, s.median, s.q75, s.max
            );
        }
    }

    /// Mean of every numeric column grouped by the target label,
    /// one row per distinct label value, ascending.
    pub fn grouped_means(df: &DataFrame) -> PolarsResult<DataFrame> {
        df.clone()
            .lazy()
            .group_by([col(TARGET_COLUMN)])
            .agg([col("*").exclude([TARGET_COLUMN]).mean()])
            .sort([TARGET_COLUMN], Default::default())
            .collect()
    }

    /// Gaussian kernel density estimate evaluated on an evenly spaced grid
    /// over `[min, max]`, using Silverman's bandwidth rule.
    pub fn gaussian_kde(values: &[f64], grid_points: usize) -> Vec<(f64, f64)> {
        let n = values.len();
        if n < 2 || grid_points < 2 {
            return Vec::new();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let min = sorted[0];
        let max = sorted[n - 1];
        if max <= min {
            return Vec::new();
        }

        let summary = Self::compute_summary("", values);
        let iqr = summary.q75 - summary.q25;
        let spread = if iqr > 0.0 {
            summary.std.min(iqr / 1.34)
        } else {
            summary.std
        };
        let mut bandwidth = 0.9 * spread * (n as f64).powf(-0.2);
        if bandwidth <= 0.0 {
            bandwidth = 1.0;
        }

        let Ok(kernel) = Normal::new(0.0, 1.0) else {
            return Vec::new();
        };

        let step = (max - min) / (grid_points - 1) as f64;
        (0..grid_points)
            .map(|i| {
                let x = min + i as f64 * step;
                let density = values
                    .iter()
                    .map(|&v| kernel.pdf((x - v) / bandwidth))
                    .sum::<f64>()
                    / (n as f64 * bandwidth);
                (x, density)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FEATURE_COLUMNS;

    #[test]
    fn percentile_interpolates_between_ranks() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert!((StatsCalculator::percentile(&sorted, 50.0) - 2.5).abs() < 1e-12);
        assert!((StatsCalculator::percentile(&sorted, 25.0) - 1.75).abs() < 1e-12);
        assert!((StatsCalculator::percentile(&sorted, 0.0) - 1.0).abs() < 1e-12);
        assert!((StatsCalculator::percentile(&sorted, 100.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn describe_matches_published_iris_values() {
        let df = crate::data::DatasetLoader::load().unwrap();
        let summaries = StatsCalculator::describe(&df).unwrap();

        let sepal_length = summaries
            .iter()
            .find(|s| s.name == "sepal length (cm)")
            .unwrap();
        assert_eq!(sepal_length.count, 150);
        assert!((sepal_length.mean - 5.843).abs() < 0.05);
        assert!((sepal_length.std - 0.828).abs() < 0.05);
        assert!((sepal_length.min - 4.3).abs() < 1e-9);
        assert!((sepal_length.max - 7.9).abs() < 1e-9);
    }

    #[test]
    fn grouped_means_has_one_row_per_label() {
        let df = crate::data::DatasetLoader::load().unwrap();
        let grouped = StatsCalculator::grouped_means(&df).unwrap();
        assert_eq!(grouped.height(), 3);

        let labels = StatsCalculator::column_values(&grouped, TARGET_COLUMN).unwrap();
        assert_eq!(labels, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn grouped_means_lie_within_observed_range() {
        let df = crate::data::DatasetLoader::load().unwrap();
        let grouped = StatsCalculator::grouped_means(&df).unwrap();

        for feature in FEATURE_COLUMNS {
            let values = StatsCalculator::column_values(&df, feature).unwrap();
            let summary = StatsCalculator::compute_summary(feature, &values);
            let means = StatsCalculator::column_values(&grouped, feature).unwrap();
            assert_eq!(means.len(), 3);
            for mean in means {
                assert!(mean >= summary.min && mean <= summary.max);
            }
        }
    }

    #[test]
    fn kde_is_a_density() {
        let values: Vec<f64> = (0..100).map(|i| (i % 10) as f64).collect();
        let curve = StatsCalculator::gaussian_kde(&values, 200);
        assert_eq!(curve.len(), 200);
        assert!(curve.iter().all(|&(_, d)| d.is_finite() && d >= 0.0));

        // Trapezoidal integral over the observed range should be close to 1
        // (tails outside the range account for the shortfall).
        let integral: f64 = curve
            .windows(2)
            .map(|w| (w[1].0 - w[0].0) * (w[0].1 + w[1].1) / 2.0)
            .sum();
        assert!(integral > 0.8 && integral < 1.05);
    }

    #[test]
    fn empty_column_yields_empty_summary() {
        let summary = StatsCalculator::compute_summary("empty", &[]);
        assert_eq!(summary.count, 0);
        assert!(summary.mean.is_nan());
    }
}
