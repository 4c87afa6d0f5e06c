//! Error taxonomy for the toolkit.
//!
//! Fatal conditions (missing columns, unreadable files, malformed benchmark
//! tables) abort a run before any output is written. Row-level parse
//! problems are NOT errors - they are per-row skips handled at the reader.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolkitError {
    /// A required column is absent from the input header.
    #[error("input file {} is missing required column(s): {columns}", .path.display())]
    MissingColumns { path: PathBuf, columns: String },

    /// The input file could not be opened.
    #[error("input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A benchmark table does not have the shape an operation needs.
    #[error("bad table shape in {}: {detail}", .path.display())]
    BadTableShape { path: PathBuf, detail: String },

    /// Prediction and label sequences must be the same length.
    #[error("length mismatch: {predictions} predictions vs {labels} labels")]
    LengthMismatch { predictions: usize, labels: usize },

    /// A simulation configuration that cannot be run.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ToolkitError>;
