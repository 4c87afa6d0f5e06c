//! Rule-based baseline detectors.
//!
//! Sanity baselines run against already-labeled `Data,Label` datasets. The
//! rules reuse the threshold-range extraction from the labeling engine and
//! are scored with point-wise precision and recall.

pub mod metrics;
pub mod rules;

#[cfg(test)]
mod tests;

use std::path::Path;

use crate::dataset;
use crate::error::Result;

pub use metrics::{ConfusionCounts, evaluate};
pub use rules::{BaselineRule, predict};

/// Run a baseline rule over a labeled dataset and report how it scores.
pub fn run_baseline(path: &Path, rule: &BaselineRule) -> Result<ConfusionCounts> {
    let (values, labels) = dataset::read_labeled_dataset(path)?;
    if values.is_empty() {
        log::info!("nothing to process: no valid rows in {}", path.display());
        return Ok(ConfusionCounts::default());
    }

    let predictions = predict(&values, rule);
    let counts = evaluate(&labels, &predictions)?;

    log::info!(
        "{}: TP={} FP={} FN={} precision={:.4} recall={:.4}",
        rule.name(),
        counts.true_positives,
        counts.false_positives,
        counts.false_negatives,
        counts.precision(),
        counts.recall()
    );
    Ok(counts)
}
