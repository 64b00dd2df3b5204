//! Data module - dataset loading and exploration

mod explorer;
mod loader;

pub use explorer::{DataExplorer, ExplorerError};
pub use loader::{DatasetLoader, LoaderError, FEATURE_COLUMNS, TARGET_COLUMN};
