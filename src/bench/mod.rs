//! Benchmark-result aggregation: pivoting per-model score tables, comparing
//! reproduced scores against published ones, and per-dataset summaries.

pub mod compare;
pub mod pivot;
pub mod summary;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Result, ToolkitError};

pub use compare::{compare_wide_tables, sort_by_avg_abs_diff, ModelComparison};
pub use pivot::pivot_long_to_wide;
pub use summary::{summarize_dataset_dir, DatasetSummary};

/// A wide score table: one key column, one column per model.
#[derive(Debug, Clone)]
pub struct WideTable {
    /// Column names other than the key, in header order.
    pub columns: Vec<String>,
    /// Key value -> (column name -> cell text).
    pub rows: BTreeMap<String, BTreeMap<String, String>>,
}

impl WideTable {
    /// Load a wide CSV keyed by `key_column`. The key column is required.
    pub fn load(path: &Path, key_column: &str) -> Result<Self> {
        if !path.exists() {
            return Err(ToolkitError::FileNotFound(path.to_path_buf()));
        }
        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();

        let key_idx = headers
            .iter()
            .position(|h| h.trim() == key_column)
            .ok_or_else(|| ToolkitError::MissingColumns {
                path: path.to_path_buf(),
                columns: key_column.to_string(),
            })?;

        let columns: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != key_idx)
            .map(|(_, h)| h.trim().to_string())
            .collect();

        let mut rows = BTreeMap::new();
        for record in reader.records() {
            let record = record?;
            let key = record.get(key_idx).unwrap_or("").trim().to_string();
            let cells: BTreeMap<String, String> = headers
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != key_idx)
                .map(|(i, h)| (h.trim().to_string(), record.get(i).unwrap_or("").trim().to_string()))
                .collect();
            rows.insert(key, cells);
        }

        Ok(Self { columns, rows })
    }

    pub fn cell(&self, key: &str, column: &str) -> Option<&str> {
        self.rows.get(key).and_then(|r| r.get(column)).map(String::as_str)
    }

    pub fn numeric_cell(&self, key: &str, column: &str) -> Option<f64> {
        self.cell(key, column).and_then(|c| c.parse().ok())
    }
}
