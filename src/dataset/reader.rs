use std::path::Path;

use chrono::NaiveDateTime;

use crate::constants::{LOG_COLUMN_STATE, LOG_COLUMN_TIMESTAMP, LOG_TIMESTAMP_FORMAT};
use crate::error::{Result, ToolkitError};

use super::record::Sample;

/// Load a raw execution log into a fully materialized sample sequence.
///
/// The header must contain `state` and the requested metric column; both are
/// checked before any row is read. Rows whose metric cell does not parse get
/// `value: None` and a warning naming the row and the raw text.
pub fn read_execution_log(path: &Path, metric_column: &str) -> Result<Vec<Sample>> {
    let mut reader = open_csv(path)?;

    let headers = reader.headers()?.clone();
    let state_idx = column_index(&headers, LOG_COLUMN_STATE);
    let metric_idx = column_index(&headers, metric_column);
    let timestamp_idx = column_index(&headers, LOG_COLUMN_TIMESTAMP);

    let mut missing = Vec::new();
    if state_idx.is_none() {
        missing.push(LOG_COLUMN_STATE);
    }
    if metric_idx.is_none() {
        missing.push(metric_column);
    }
    if !missing.is_empty() {
        return Err(ToolkitError::MissingColumns {
            path: path.to_path_buf(),
            columns: missing.join(", "),
        });
    }
    let (state_idx, metric_idx) = (state_idx.unwrap(), metric_idx.unwrap());

    let mut samples = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let state = record.get(state_idx).unwrap_or("").trim().to_string();
        let raw_value = record.get(metric_idx).unwrap_or("").trim();

        let value = if raw_value.is_empty() {
            None
        } else {
            match raw_value.parse::<f64>() {
                Ok(v) => Some(v),
                Err(_) => {
                    // Row index reported 1-based past the header, matching
                    // what an editor shows.
                    log::warn!(
                        "could not parse metric value '{}' at input row {}; sample excluded from output",
                        raw_value,
                        row + 2
                    );
                    None
                }
            }
        };

        let timestamp = timestamp_idx
            .and_then(|i| record.get(i))
            .and_then(|raw| NaiveDateTime::parse_from_str(raw.trim(), LOG_TIMESTAMP_FORMAT).ok());

        samples.push(Sample {
            timestamp,
            state,
            value,
        });
    }

    Ok(samples)
}

/// Load a two-column `Data,Label` dataset.
///
/// Rows with the wrong column count or unparseable cells are skipped with a
/// warning, mirroring how the baseline evaluators tolerate stray rows.
pub fn read_labeled_dataset(path: &Path) -> Result<(Vec<f64>, Vec<u8>)> {
    let mut reader = open_csv(path)?;

    let mut values = Vec::new();
    let mut labels = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() != 2 {
            log::warn!("skipping row {} with {} columns (expected 2)", row + 2, record.len());
            continue;
        }
        let value = record.get(0).unwrap_or("").trim().parse::<f64>();
        let label = record.get(1).unwrap_or("").trim().parse::<u8>();
        match (value, label) {
            (Ok(v), Ok(l)) if l <= 1 => {
                values.push(v);
                labels.push(l);
            }
            _ => log::warn!("skipping invalid row {}: {:?}", row + 2, record),
        }
    }

    Ok((values, labels))
}

fn open_csv(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    if !path.exists() {
        return Err(ToolkitError::FileNotFound(path.to_path_buf()));
    }
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}
