//! Iris Insight - Iris Dataset Exploratory Analysis
//!
//! Loads the embedded iris dataset, prints descriptive statistics and
//! grouped means, and renders four chart images into the plots directory.

use std::path::Path;

use iris_insight::charts::PLOTS_DIR;
use iris_insight::data::DatasetLoader;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Iris Dataset Analysis");

    iris_insight::run(DatasetLoader::load(), Path::new(PLOTS_DIR))
}
