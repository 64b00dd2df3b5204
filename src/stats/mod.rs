//! Stats module - descriptive statistics and grouped aggregates

mod calculator;

pub use calculator::{ColumnSummary, StatsCalculator};
