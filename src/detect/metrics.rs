use crate::error::{Result, ToolkitError};

/// Point-wise confusion counts for a binary prediction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionCounts {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl ConfusionCounts {
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Compare predictions against ground-truth labels.
///
/// Length mismatch means the caller paired the wrong files; metrics computed
/// over a partial zip would be silently wrong, so it is an error.
pub fn evaluate(labels: &[u8], predictions: &[u8]) -> Result<ConfusionCounts> {
    if labels.len() != predictions.len() {
        return Err(ToolkitError::LengthMismatch {
            predictions: predictions.len(),
            labels: labels.len(),
        });
    }

    let mut counts = ConfusionCounts::default();
    for (&truth, &pred) in labels.iter().zip(predictions) {
        match (pred, truth) {
            (1, 1) => counts.true_positives += 1,
            (1, 0) => counts.false_positives += 1,
            (0, 1) => counts.false_negatives += 1,
            _ => {}
        }
    }
    Ok(counts)
}
