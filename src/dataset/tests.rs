use std::fs;

use tempfile::tempdir;

use crate::constants::METRIC_CPU_PERCENT;
use crate::error::ToolkitError;

use super::reader::{read_execution_log, read_labeled_dataset};
use super::record::LabeledSample;
use super::writer::write_training_data;

#[test]
fn execution_log_loads_states_and_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.csv");
    fs::write(
        &path,
        "timestamp,state,event_type,event_details,cpu_percent\n\
         2025-05-23 15:11:44,idle,SAMPLED_STATE,,12.5\n\
         2025-05-23 15:11:45,working_normal,WORKLOAD_START,type:normal,\n\
         2025-05-23 15:11:46,working_anomaly,SAMPLED_STATE,,91.0\n",
    )
    .unwrap();

    let samples = read_execution_log(&path, METRIC_CPU_PERCENT).unwrap();
    assert_eq!(samples.len(), 3);
    assert_eq!(samples[0].value, Some(12.5));
    assert!(samples[0].timestamp.is_some());
    // Event rows have an empty metric cell but keep their state.
    assert_eq!(samples[1].value, None);
    assert_eq!(samples[1].state, "working_normal");
    assert!(samples[2].is_working());
}

#[test]
fn missing_required_column_is_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.csv");
    fs::write(&path, "timestamp,event_type\n2025-05-23 15:11:44,SCRIPT_START\n").unwrap();

    let err = read_execution_log(&path, METRIC_CPU_PERCENT).unwrap_err();
    match err {
        ToolkitError::MissingColumns { columns, .. } => {
            assert!(columns.contains("state"));
            assert!(columns.contains(METRIC_CPU_PERCENT));
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = read_execution_log(std::path::Path::new("/no/such/log.csv"), METRIC_CPU_PERCENT).unwrap_err();
    assert!(matches!(err, ToolkitError::FileNotFound(_)));
}

#[test]
fn unparseable_metric_cells_become_none() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.csv");
    fs::write(
        &path,
        "timestamp,state,event_type,event_details,ram_usage_mb\n\
         2025-05-23 15:11:44,idle,SAMPLED_STATE,,not-a-number\n\
         2025-05-23 15:11:45,idle,SAMPLED_STATE,,523.1\n",
    )
    .unwrap();

    let samples = read_execution_log(&path, "ram_usage_mb").unwrap();
    assert_eq!(samples[0].value, None);
    assert_eq!(samples[1].value, Some(523.1));
}

#[test]
fn labeled_dataset_skips_malformed_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(
        &path,
        "Data,Label\n50.0,0\nnot-a-number,1\n90.0,1\n80.0\n70.0,0\n",
    )
    .unwrap();

    let (values, labels) = read_labeled_dataset(&path).unwrap();
    assert_eq!(values, vec![50.0, 90.0, 70.0]);
    assert_eq!(labels, vec![0, 1, 0]);
}

#[test]
fn training_data_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out").join("training.csv");

    let rows = vec![LabeledSample::new(50.0, 0), LabeledSample::new(95.5, 1)];
    write_training_data(&path, &rows).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "Data,Label");
    assert_eq!(lines.len(), 3);

    let (values, labels) = read_labeled_dataset(&path).unwrap();
    assert_eq!(values, vec![50.0, 95.5]);
    assert_eq!(labels, vec![0, 1]);
}
