use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::error::{Result, ToolkitError};

/// Pivot a long table (`file,model,<value>` rows) into a wide one with a
/// column per model.
///
/// A duplicate (file, model) pair makes the pivot ambiguous and is fatal,
/// matching how a dataframe pivot rejects duplicate index entries.
pub fn pivot_long_to_wide(
    input: &Path,
    output: &Path,
    index_column: &str,
    pivot_column: &str,
    value_column: &str,
) -> Result<usize> {
    if !input.exists() {
        return Err(ToolkitError::FileNotFound(input.to_path_buf()));
    }
    let mut reader = csv::Reader::from_path(input)?;
    let headers = reader.headers()?.clone();

    let mut missing = Vec::new();
    let mut find = |name: &str| match headers.iter().position(|h| h.trim() == name) {
        Some(idx) => Some(idx),
        None => {
            missing.push(name.to_string());
            None
        }
    };
    let index_idx = find(index_column);
    let pivot_idx = find(pivot_column);
    let value_idx = find(value_column);
    if !missing.is_empty() {
        return Err(ToolkitError::MissingColumns {
            path: input.to_path_buf(),
            columns: missing.join(", "),
        });
    }
    let (index_idx, pivot_idx, value_idx) = (index_idx.unwrap(), pivot_idx.unwrap(), value_idx.unwrap());

    let mut models = BTreeSet::new();
    let mut cells: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();

    for record in reader.records() {
        let record = record?;
        let file = record.get(index_idx).unwrap_or("").trim().to_string();
        let model = record.get(pivot_idx).unwrap_or("").trim().to_string();
        let value = record.get(value_idx).unwrap_or("").trim().to_string();

        models.insert(model.clone());
        let row = cells.entry(file.clone()).or_default();
        if row.insert(model.clone(), value).is_some() {
            return Err(ToolkitError::BadTableShape {
                path: input.to_path_buf(),
                detail: format!("duplicate ({file}, {model}) entry"),
            });
        }
    }

    let mut writer = csv::Writer::from_path(output)?;
    let mut header = vec![index_column.to_string()];
    header.extend(models.iter().cloned());
    writer.write_record(&header)?;

    for (file, row) in &cells {
        let mut record = vec![file.clone()];
        record.extend(models.iter().map(|m| row.get(m).cloned().unwrap_or_default()));
        writer.write_record(&record)?;
    }
    writer.flush()?;

    log::info!(
        "pivoted {} rows x {} models -> {}",
        cells.len(),
        models.len(),
        output.display()
    );
    Ok(cells.len())
}
