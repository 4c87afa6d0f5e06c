//! Label Propagation Engine.
//!
//! Deterministic transformation from a sequence of raw `(state, value)`
//! samples into a supervised `(value, label)` anomaly dataset. Interval
//! extraction and label painting are two separate passes over one fully
//! materialized sequence; each run is a pure function of its input.

pub mod extractor;
pub mod labeler;
pub mod merge;
pub mod types;


use std::path::Path;

use crate::dataset::{self, LabeledSample, Sample};
use crate::error::Result;

pub use extractor::extract_intervals;
pub use labeler::{build_output, paint_labels, propagate_successor};
pub use merge::merge_hardware_log;
pub use types::{GracePolicy, Interval, LabelingConfig, Reason, RunAcceptance, StateTagPolicy, ThresholdPolicy};

/// Run the full engine over an in-memory sequence.
pub fn label_samples(samples: &[Sample], config: &LabelingConfig) -> Vec<LabeledSample> {
    let intervals = extract_intervals(samples, config);
    let mut labels = paint_labels(samples.len(), &intervals);
    if config.propagate_successor {
        propagate_successor(&mut labels);
    }
    build_output(samples, &labels)
}

/// Batch transform: execution log CSV in, `Data,Label` CSV out.
///
/// Zero retained samples is a no-op success: nothing is written and the
/// caller gets `Ok(0)`.
pub fn convert_log(
    input: &Path,
    output: &Path,
    metric_column: &str,
    config: &LabelingConfig,
) -> Result<usize> {
    let samples = dataset::read_execution_log(input, metric_column)?;
    let labeled = label_samples(&samples, config);

    if labeled.is_empty() {
        log::info!("nothing to process: no samples with a valid '{}' value", metric_column);
        return Ok(0);
    }

    dataset::write_training_data(output, &labeled)?;
    log::info!(
        "labeled {} of {} samples ({} anomalous) -> {}",
        labeled.len(),
        samples.len(),
        labeled.iter().filter(|s| s.label == 1).count(),
        output.display()
    );
    Ok(labeled.len())
}
