use std::fs;

use tempfile::tempdir;

use crate::error::ToolkitError;

use super::compare::{compare_wide_tables, sort_by_avg_abs_diff};
use super::pivot::pivot_long_to_wide;
use super::summary::summarize_dataset_dir;
use super::WideTable;

#[test]
fn pivot_produces_one_column_per_model() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("long.csv");
    let output = dir.path().join("wide.csv");
    fs::write(
        &input,
        "file,model,VUS-PR\n\
         a.csv,LOF,0.5\n\
         a.csv,IForest,0.6\n\
         b.csv,LOF,0.4\n",
    )
    .unwrap();

    let rows = pivot_long_to_wide(&input, &output, "file", "model", "VUS-PR").unwrap();
    assert_eq!(rows, 2);

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "file,IForest,LOF");
    assert_eq!(lines[1], "a.csv,0.6,0.5");
    // b.csv has no IForest entry; its cell stays empty.
    assert_eq!(lines[2], "b.csv,,0.4");
}

#[test]
fn pivot_rejects_duplicate_entries() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("long.csv");
    fs::write(&input, "file,model,VUS-PR\na.csv,LOF,0.5\na.csv,LOF,0.6\n").unwrap();

    let err = pivot_long_to_wide(&input, &dir.path().join("wide.csv"), "file", "model", "VUS-PR").unwrap_err();
    assert!(matches!(err, ToolkitError::BadTableShape { .. }));
}

#[test]
fn compare_reports_diff_statistics_per_model() {
    let dir = tempdir().unwrap();
    let ours = dir.path().join("ours.csv");
    let theirs = dir.path().join("theirs.csv");
    let output = dir.path().join("comparison.csv");
    fs::write(
        &ours,
        "file,LOF,IForest\n\
         a.csv,0.50,0.90\n\
         b.csv,0.40,0.20\n",
    )
    .unwrap();
    fs::write(
        &theirs,
        "file,LOF,num_anomaly\n\
         a.csv,0.45,7\n\
         b.csv,0.80,3\n",
    )
    .unwrap();

    let results = compare_wide_tables(&ours, &theirs, &output).unwrap();
    // Only LOF is shared; IForest and num_anomaly are not model columns in
    // both tables.
    assert_eq!(results.len(), 1);
    let lof = &results[0];
    assert_eq!(lof.model, "LOF");
    assert!((lof.avg_abs_diff - 0.225).abs() < 1e-9);
    assert!((lof.max_abs_diff - 0.40).abs() < 1e-9);
    assert_eq!(lof.file_with_max_diff, "b.csv");
    assert_eq!(lof.num_anomaly, "3");
    assert_eq!(lof.datasets_diff_gt_5pct, 1);
    assert_eq!(lof.datasets_diff_gt_25pct, 1);
    assert_eq!(lof.datasets_diff_gt_50pct, 0);
    assert!(output.exists());
}

#[test]
fn compare_with_no_common_models_is_fatal() {
    let dir = tempdir().unwrap();
    let ours = dir.path().join("ours.csv");
    let theirs = dir.path().join("theirs.csv");
    fs::write(&ours, "file,LOF\na.csv,0.5\n").unwrap();
    fs::write(&theirs, "file,IForest\na.csv,0.5\n").unwrap();

    let err = compare_wide_tables(&ours, &theirs, &dir.path().join("out.csv")).unwrap_err();
    assert!(matches!(err, ToolkitError::BadTableShape { .. }));
}

#[test]
fn sort_orders_largest_diff_first() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("comparison.csv");
    fs::write(
        &path,
        "model,avg_abs_diff\nLOF,0.1\nIForest,0.4\nSR,0.2\n",
    )
    .unwrap();

    sort_by_avg_abs_diff(&path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[1], "IForest,0.4");
    assert_eq!(lines[2], "SR,0.2");
    assert_eq!(lines[3], "LOF,0.1");
}

#[test]
fn summary_finds_best_model_and_family_means() {
    let dir = tempdir().unwrap();
    let scores_dir = dir.path().join("scores");
    fs::create_dir_all(&scores_dir).unwrap();
    fs::write(
        scores_dir.join("010_dataset.csv"),
        "Model,VUS-PR,VUS-ROC\n\
         LOF,0.2,0.5\n\
         KMeansAD_U,0.6,0.7\n\
         CNN,0.4,0.3\n",
    )
    .unwrap();

    let output = dir.path().join("summary.csv");
    let summaries = summarize_dataset_dir(&scores_dir, &["VUS-PR", "VUS-ROC"], &output).unwrap();
    assert_eq!(summaries.len(), 2);

    let vus_pr = &summaries[0];
    assert_eq!(vus_pr.metric, "VUS-PR");
    // KMeansAD_U is normalized into the statistical family.
    assert_eq!(vus_pr.best_model, "KMeansAD");
    assert!((vus_pr.best_score - 0.6).abs() < 1e-9);
    assert!((vus_pr.avg_all - 0.4).abs() < 1e-9);
    assert!((vus_pr.avg_statistical - 0.4).abs() < 1e-9);
    assert!((vus_pr.avg_neural_net - 0.4).abs() < 1e-9);
    assert!(output.exists());
}

#[test]
fn summary_skips_files_missing_columns() {
    let dir = tempdir().unwrap();
    let scores_dir = dir.path().join("scores");
    fs::create_dir_all(&scores_dir).unwrap();
    fs::write(scores_dir.join("good.csv"), "Model,VUS-PR\nLOF,0.5\n").unwrap();
    fs::write(scores_dir.join("bad.csv"), "Model,other\nLOF,0.5\n").unwrap();

    let output = dir.path().join("summary.csv");
    let summaries = summarize_dataset_dir(&scores_dir, &["VUS-PR"], &output).unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].dataset, "good.csv");
}

#[test]
fn wide_table_requires_its_key_column() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("table.csv");
    fs::write(&path, "name,LOF\na.csv,0.5\n").unwrap();

    let err = WideTable::load(&path, "file").unwrap_err();
    assert!(matches!(err, ToolkitError::MissingColumns { .. }));
}
