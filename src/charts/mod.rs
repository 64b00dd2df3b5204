//! Charts module - static chart rendering

mod renderer;

pub use renderer::{
    ChartError, ChartRenderer, BAR_CHART_FILE, CHART_FILES, HISTOGRAM_FILE, LINE_CHART_FILE,
    PLOTS_DIR, SCATTER_CHART_FILE,
};
