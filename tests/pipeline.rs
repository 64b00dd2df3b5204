//! End-to-end pipeline test: load, clean, analyze, render.

use std::fs;

use iris_insight::charts::{ChartRenderer, CHART_FILES};
use iris_insight::data::{DataExplorer, DatasetLoader};
use iris_insight::stats::StatsCalculator;

#[test]
fn full_run_writes_exactly_four_chart_files() {
    let df = DatasetLoader::load().unwrap();
    let cleaned = DataExplorer::drop_missing(&df).unwrap();
    assert_eq!(cleaned.height(), 150);

    let grouped = StatsCalculator::grouped_means(&cleaned).unwrap();
    assert_eq!(grouped.height(), 3);

    let dir = tempfile::tempdir().unwrap();
    ChartRenderer::render_all(&cleaned, dir.path()).unwrap();

    let mut names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();

    let mut expected: Vec<String> = CHART_FILES.iter().map(|s| s.to_string()).collect();
    expected.sort();
    assert_eq!(names, expected);

    for name in &names {
        let len = fs::metadata(dir.path().join(name)).unwrap().len();
        assert!(len > 0, "{name} should not be empty");
    }
}

#[test]
fn rerun_overwrites_chart_files_in_place() {
    let df = DatasetLoader::load().unwrap();
    let cleaned = DataExplorer::drop_missing(&df).unwrap();

    let dir = tempfile::tempdir().unwrap();
    ChartRenderer::render_all(&cleaned, dir.path()).unwrap();
    ChartRenderer::render_all(&cleaned, dir.path()).unwrap();

    let count = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(count, CHART_FILES.len());
}

#[test]
fn run_renders_charts_for_the_reference_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("plots");

    iris_insight::run(DatasetLoader::load(), &out_dir).unwrap();

    for name in CHART_FILES {
        let len = fs::metadata(out_dir.join(name)).unwrap().len();
        assert!(len > 0, "{name} should not be empty");
    }
}

#[test]
fn failed_load_aborts_before_any_output_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("plots");

    let load = DatasetLoader::from_csv(b"not,a\nvalid,iris,table\n");
    assert!(load.is_err());

    // The run checks the loader result before any later stage executes,
    // so the output directory is never even created.
    iris_insight::run(load, &out_dir).unwrap();
    assert!(!out_dir.exists());
}
