//! Merge an external hardware-monitor CSV with an execution log.
//!
//! The monitor samples on its own clock, so rows are aligned by exact
//! timestamp; monitor rows with no matching log entry count as normal.
//! The anomaly label then propagates to the immediately following row,
//! reusing the engine's successor pass.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::constants::{LOG_COLUMN_STATE, LOG_COLUMN_TIMESTAMP, LOG_TIMESTAMP_FORMAT};
use crate::dataset::{self, LabeledSample};
use crate::error::{Result, ToolkitError};

use super::labeler::propagate_successor;

/// Join a `time,<value>` monitor CSV against a `timestamp,state` log and
/// emit a labeled dataset.
pub fn merge_hardware_log(
    data_path: &Path,
    log_path: &Path,
    value_column: &str,
    anomaly_tag: &str,
    output: &Path,
) -> Result<usize> {
    let states = load_state_index(log_path)?;

    let mut reader = open(data_path)?;
    let headers = reader.headers()?.clone();
    let time_idx = headers.iter().position(|h| h.trim() == "time");
    let value_idx = headers.iter().position(|h| h.trim() == value_column);

    let mut missing = Vec::new();
    if time_idx.is_none() {
        missing.push("time");
    }
    if value_idx.is_none() {
        missing.push(value_column);
    }
    if !missing.is_empty() {
        return Err(ToolkitError::MissingColumns {
            path: data_path.to_path_buf(),
            columns: missing.join(", "),
        });
    }
    let (time_idx, value_idx) = (time_idx.unwrap(), value_idx.unwrap());

    let mut values = Vec::new();
    let mut labels = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let raw_time = record.get(time_idx).unwrap_or("").trim();
        let raw_value = record.get(value_idx).unwrap_or("").trim();

        let value = match raw_value.parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                log::warn!("could not parse '{}' at monitor row {}; row dropped", raw_value, row + 2);
                continue;
            }
        };

        // Unmatched timestamps default to normal, same as a left join.
        let label = NaiveDateTime::parse_from_str(raw_time, LOG_TIMESTAMP_FORMAT)
            .ok()
            .and_then(|t| states.get(&t))
            .map(|state| u8::from(state == anomaly_tag))
            .unwrap_or(0);

        values.push(value);
        labels.push(label);
    }

    if values.is_empty() {
        log::info!("nothing to process: no usable monitor rows in {}", data_path.display());
        return Ok(0);
    }

    propagate_successor(&mut labels);

    let rows: Vec<LabeledSample> = values
        .into_iter()
        .zip(&labels)
        .map(|(value, &label)| LabeledSample::new(value, label))
        .collect();
    dataset::write_training_data(output, &rows)?;
    log::info!(
        "merged {} monitor rows ({} anomalous) -> {}",
        rows.len(),
        rows.iter().filter(|r| r.label == 1).count(),
        output.display()
    );
    Ok(rows.len())
}

fn load_state_index(log_path: &Path) -> Result<HashMap<NaiveDateTime, String>> {
    let mut reader = open(log_path)?;
    let headers = reader.headers()?.clone();

    let time_idx = headers.iter().position(|h| h.trim() == LOG_COLUMN_TIMESTAMP);
    let state_idx = headers.iter().position(|h| h.trim() == LOG_COLUMN_STATE);
    let (time_idx, state_idx) = match (time_idx, state_idx) {
        (Some(t), Some(s)) => (t, s),
        _ => {
            let mut missing = Vec::new();
            if time_idx.is_none() {
                missing.push(LOG_COLUMN_TIMESTAMP);
            }
            if state_idx.is_none() {
                missing.push(LOG_COLUMN_STATE);
            }
            return Err(ToolkitError::MissingColumns {
                path: log_path.to_path_buf(),
                columns: missing.join(", "),
            });
        }
    };

    let mut states = HashMap::new();
    for record in reader.records() {
        let record = record?;
        let raw_time = record.get(time_idx).unwrap_or("").trim();
        if let Ok(time) = NaiveDateTime::parse_from_str(raw_time, LOG_TIMESTAMP_FORMAT) {
            states.insert(time, record.get(state_idx).unwrap_or("").trim().to_string());
        }
    }
    Ok(states)
}

fn open(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    if !path.exists() {
        return Err(ToolkitError::FileNotFound(path.to_path_buf()));
    }
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?)
}
