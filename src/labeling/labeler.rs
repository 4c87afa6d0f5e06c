//! Sequence Labeler.
//!
//! Combines interval sets into one 0/1 label array over the full sample
//! sequence, then filters output rows to samples with a usable value.
//! Index alignment happens before filtering, so dropped rows never shift
//! interval positions.

use crate::dataset::{LabeledSample, Sample};

use super::types::Interval;

/// OR-paint every interval over a zeroed label array.
///
/// An index covered by several intervals stays 1; intervals are never
/// intersected.
pub fn paint_labels(len: usize, intervals: &[Interval]) -> Vec<u8> {
    let mut labels = vec![0u8; len];
    for interval in intervals {
        if interval.start >= len {
            continue;
        }
        let end = interval.end.min(len - 1);
        for label in &mut labels[interval.start..=end] {
            *label = 1;
        }
    }
    labels
}

/// Force the sample immediately after each anomalous sample anomalous too.
///
/// The pass reads a snapshot of the incoming array, so propagation is
/// exactly one step and never cascades down the sequence.
pub fn propagate_successor(labels: &mut [u8]) {
    let snapshot = labels.to_vec();
    for i in 0..snapshot.len().saturating_sub(1) {
        if snapshot[i] == 1 {
            labels[i + 1] = 1;
        }
    }
}

/// Emit `(value, label)` pairs for samples whose value parsed.
pub fn build_output(samples: &[Sample], labels: &[u8]) -> Vec<LabeledSample> {
    samples
        .iter()
        .zip(labels)
        .filter_map(|(sample, &label)| sample.value.map(|value| LabeledSample::new(value, label)))
        .collect()
}
