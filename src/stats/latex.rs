//! LaTeX table generation from per-model metrics CSVs.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::{Result, ToolkitError};

/// Columns a metrics CSV must carry, in table order.
const REQUIRED_COLUMNS: [&str; 5] = ["Model", "AUC-PR", "AUC-ROC", "VUS-PR", "VUS-ROC"];

/// Render a model-performance CSV as a LaTeX table.
///
/// The caption names the source dataset (derived from the file name, with
/// underscores escaped); a missing required column is fatal.
pub fn table_from_csv(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ToolkitError::FileNotFound(path.to_path_buf()));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut indices = Vec::with_capacity(REQUIRED_COLUMNS.len());
    let mut missing = Vec::new();
    for name in REQUIRED_COLUMNS {
        match headers.iter().position(|h| h.trim() == name) {
            Some(idx) => indices.push(idx),
            None => missing.push(name),
        }
    }
    if !missing.is_empty() {
        return Err(ToolkitError::MissingColumns {
            path: path.to_path_buf(),
            columns: missing.join(", "),
        });
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset");
    let caption_name = stem.replace('_', "\\_");

    let mut out = String::new();
    let _ = writeln!(out, "\\begin{{table}}[htbp]");
    let _ = writeln!(out, "\\centering");
    let _ = writeln!(out, "\\caption{{Model Performance Comparison on {caption_name}}}");
    let _ = writeln!(out, "\\label{{tab:model_performance_{stem}}}");
    let _ = writeln!(out, "\\begin{{tabular}}{{|l|c|c|c|c|}}");
    let _ = writeln!(out, "\\hline");
    let _ = writeln!(
        out,
        "\\textbf{{Model}} & \\textbf{{AUC-PR}} & \\textbf{{AUC-ROC}} & \\textbf{{VUS-PR}} & \\textbf{{VUS-ROC}} \\\\"
    );
    let _ = writeln!(out, "\\hline");

    for record in reader.records() {
        let record = record?;
        let cells: Vec<String> = indices
            .iter()
            .enumerate()
            .map(|(col, &idx)| {
                let raw = record.get(idx).unwrap_or("").trim();
                if col == 0 {
                    raw.replace('_', "\\_")
                } else {
                    // Scores render with a fixed precision; anything
                    // non-numeric passes through untouched.
                    raw.parse::<f64>().map(|v| format!("{v:.4}")).unwrap_or_else(|_| raw.to_string())
                }
            })
            .collect();
        let _ = writeln!(out, "{} \\\\", cells.join(" & "));
        let _ = writeln!(out, "\\hline");
    }

    let _ = writeln!(out, "\\end{{tabular}}");
    let _ = writeln!(out, "\\end{{table}}");
    Ok(out)
}

/// Batch transform: metrics CSV in, `.tex` file out.
pub fn write_table(input: &Path, output: &Path) -> Result<()> {
    let table = table_from_csv(input)?;
    std::fs::write(output, table)?;
    log::info!("LaTeX table written to {}", output.display());
    Ok(())
}
