use std::path::Path;

use serde::Serialize;

use crate::error::{Result, ToolkitError};

use super::WideTable;

/// Diff thresholds reported per model, as fractions of the score scale.
const DIFF_THRESHOLDS: [f64; 3] = [0.05, 0.25, 0.50];

/// Per-model comparison between a reproduced and a published score table.
#[derive(Debug, Clone, Serialize)]
pub struct ModelComparison {
    pub model: String,
    pub avg_abs_diff: f64,
    pub max_abs_diff: f64,
    pub file_with_max_diff: String,
    pub num_anomaly: String,
    pub datasets_diff_gt_5pct: usize,
    pub datasets_diff_gt_25pct: usize,
    pub datasets_diff_gt_50pct: usize,
}

/// Align two wide score tables on their `file` column and compare every
/// model column present in both.
pub fn compare_wide_tables(ours_path: &Path, theirs_path: &Path, output: &Path) -> Result<Vec<ModelComparison>> {
    let ours = WideTable::load(ours_path, "file")?;
    let theirs = WideTable::load(theirs_path, "file")?;

    let common_models: Vec<&String> = ours
        .columns
        .iter()
        .filter(|c| theirs.columns.contains(*c) && c.as_str() != "num_anomaly")
        .collect();
    if common_models.is_empty() {
        return Err(ToolkitError::BadTableShape {
            path: theirs_path.to_path_buf(),
            detail: "no common model columns between the two tables".to_string(),
        });
    }

    let common_files: Vec<&String> = ours.rows.keys().filter(|f| theirs.rows.contains_key(*f)).collect();
    log::info!(
        "comparing {} models over {} shared datasets",
        common_models.len(),
        common_files.len()
    );

    let mut results = Vec::with_capacity(common_models.len());
    for model in common_models {
        let mut diffs: Vec<(&String, f64)> = Vec::new();
        for &file in &common_files {
            if let (Some(a), Some(b)) = (ours.numeric_cell(file, model), theirs.numeric_cell(file, model)) {
                diffs.push((file, (a - b).abs()));
            }
        }

        let mut comparison = ModelComparison {
            model: model.clone(),
            avg_abs_diff: 0.0,
            max_abs_diff: 0.0,
            file_with_max_diff: "N/A".to_string(),
            num_anomaly: "N/A".to_string(),
            datasets_diff_gt_5pct: 0,
            datasets_diff_gt_25pct: 0,
            datasets_diff_gt_50pct: 0,
        };

        if !diffs.is_empty() {
            comparison.avg_abs_diff = diffs.iter().map(|(_, d)| d).sum::<f64>() / diffs.len() as f64;
            let (max_file, max_diff) = diffs
                .iter()
                .fold((diffs[0].0, diffs[0].1), |acc, &(f, d)| if d > acc.1 { (f, d) } else { acc });
            comparison.max_abs_diff = max_diff;
            comparison.file_with_max_diff = max_file.clone();
            comparison.num_anomaly = ours
                .cell(max_file, "num_anomaly")
                .or_else(|| theirs.cell(max_file, "num_anomaly"))
                .filter(|c| !c.is_empty())
                .unwrap_or("N/A")
                .to_string();
            comparison.datasets_diff_gt_5pct = diffs.iter().filter(|(_, d)| *d > DIFF_THRESHOLDS[0]).count();
            comparison.datasets_diff_gt_25pct = diffs.iter().filter(|(_, d)| *d > DIFF_THRESHOLDS[1]).count();
            comparison.datasets_diff_gt_50pct = diffs.iter().filter(|(_, d)| *d > DIFF_THRESHOLDS[2]).count();
        }

        results.push(comparison);
    }

    write_comparisons(output, &results)?;
    log::info!("comparison summary written to {}", output.display());
    Ok(results)
}

fn write_comparisons(output: &Path, results: &[ModelComparison]) -> Result<()> {
    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record([
        "model",
        "avg_abs_diff",
        "max_abs_diff",
        "file_with_max_diff",
        "num_anomaly",
        "datasets_diff_gt_5%",
        "datasets_diff_gt_25%",
        "datasets_diff_gt_50%",
    ])?;
    for r in results {
        writer.write_record(&[
            r.model.clone(),
            r.avg_abs_diff.to_string(),
            r.max_abs_diff.to_string(),
            r.file_with_max_diff.clone(),
            r.num_anomaly.clone(),
            r.datasets_diff_gt_5pct.to_string(),
            r.datasets_diff_gt_25pct.to_string(),
            r.datasets_diff_gt_50pct.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Reorder a comparison summary by `avg_abs_diff`, largest first,
/// rewriting the file in place.
pub fn sort_by_avg_abs_diff(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ToolkitError::FileNotFound(path.to_path_buf()));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let diff_idx = headers
        .iter()
        .position(|h| h.trim() == "avg_abs_diff")
        .ok_or_else(|| ToolkitError::MissingColumns {
            path: path.to_path_buf(),
            columns: "avg_abs_diff".to_string(),
        })?;

    let mut rows: Vec<csv::StringRecord> = reader.records().collect::<std::result::Result<_, _>>()?;
    rows.sort_by(|a, b| {
        let parse = |r: &csv::StringRecord| r.get(diff_idx).and_then(|c| c.trim().parse::<f64>().ok());
        // Unparseable cells sink to the bottom.
        match (parse(a), parse(b)) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&headers)?;
    for row in &rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    log::info!("sorted {} by avg_abs_diff", path.display());
    Ok(())
}
