use std::fs;

use tempfile::tempdir;

use super::latex::table_from_csv;
use super::{anomaly_stats, write_stats_report};
use crate::error::ToolkitError;

#[test]
fn stats_count_runs_and_points() {
    let labels = vec![0, 1, 1, 0, 0, 1, 1, 1, 0, 1];
    let stats = anomaly_stats(&labels);
    assert_eq!(stats.total_sequences, 3);
    assert_eq!(stats.total_anomaly_points, 6);
    assert_eq!(stats.average_length, 2.0);
    assert_eq!(stats.longest_length, 3);
    assert_eq!(stats.shortest_length, 1);
    assert!((stats.anomaly_ratio - 0.6).abs() < 1e-9);
}

#[test]
fn trailing_run_is_closed_at_the_last_index() {
    let stats = anomaly_stats(&[0, 0, 1, 1]);
    assert_eq!(stats.total_sequences, 1);
    assert_eq!(stats.longest_length, 2);
}

#[test]
fn anomaly_free_labels_yield_zeroed_stats() {
    let stats = anomaly_stats(&[0, 0, 0]);
    assert_eq!(stats.total_sequences, 0);
    assert_eq!(stats.total_anomaly_points, 0);
    assert_eq!(stats.average_length, 0.0);
    assert_eq!(stats.anomaly_ratio, 0.0);
}

#[test]
fn report_file_contains_every_metric_line() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data.csv");
    let output = dir.path().join("data_metrics.txt");
    fs::write(&input, "Data,Label\n1.0,0\n2.0,1\n3.0,1\n4.0,0\n").unwrap();

    let stats = write_stats_report(&input, &output).unwrap();
    assert_eq!(stats.total_sequences, 1);

    let report = fs::read_to_string(&output).unwrap();
    assert!(report.contains("Total Anomaly Sequences: 1"));
    assert!(report.contains("Anomaly Ratio: 0.5000"));
}

#[test]
fn latex_table_escapes_and_formats() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("012_RAMmedium_scores.csv");
    fs::write(
        &input,
        "Model,AUC-PR,AUC-ROC,VUS-PR,VUS-ROC\nSub_LOF,0.5,0.75,0.31337,0.9\n",
    )
    .unwrap();

    let table = table_from_csv(&input).unwrap();
    assert!(table.contains("\\begin{table}[htbp]"));
    assert!(table.contains("012\\_RAMmedium\\_scores"));
    assert!(table.contains("Sub\\_LOF & 0.5000 & 0.7500 & 0.3134 & 0.9000 \\\\"));
    assert!(table.ends_with("\\end{table}\n"));
}

#[test]
fn latex_table_requires_all_metric_columns() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("scores.csv");
    fs::write(&input, "Model,AUC-PR\nLOF,0.5\n").unwrap();

    let err = table_from_csv(&input).unwrap_err();
    match err {
        ToolkitError::MissingColumns { columns, .. } => {
            assert!(columns.contains("VUS-PR"));
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}
