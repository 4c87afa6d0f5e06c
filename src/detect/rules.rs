use crate::constants::{
    BOUNDED_RANGE_LENGTHS, BOUNDED_RANGE_LOWER, BOUNDED_RANGE_UPPER, SUSTAINED_LOW_MIN_LEN,
    SUSTAINED_LOW_THRESHOLD,
};
use crate::dataset::Sample;
use crate::labeling::{self, ThresholdPolicy};

/// The two rule variants used as sanity baselines.
#[derive(Debug, Clone)]
pub enum BaselineRule {
    /// Runs of exactly an accepted length strictly inside (lower, upper).
    BoundedRange {
        lower: f64,
        upper: f64,
        lengths: Vec<usize>,
    },
    /// Runs strictly longer than `min_len` strictly below `threshold`.
    SustainedLow { threshold: f64, min_len: usize },
}

impl BaselineRule {
    /// Medium-spike rule from the RAM datasets.
    pub fn medium_spike() -> Self {
        BaselineRule::BoundedRange {
            lower: BOUNDED_RANGE_LOWER,
            upper: BOUNDED_RANGE_UPPER,
            lengths: BOUNDED_RANGE_LENGTHS.to_vec(),
        }
    }

    /// Sleep-anomaly rule: sustained low readings.
    pub fn sleep_low() -> Self {
        BaselineRule::SustainedLow {
            threshold: SUSTAINED_LOW_THRESHOLD,
            min_len: SUSTAINED_LOW_MIN_LEN,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BaselineRule::BoundedRange { .. } => "bounded-range",
            BaselineRule::SustainedLow { .. } => "sustained-low",
        }
    }

    fn as_policy(&self) -> ThresholdPolicy {
        match self {
            BaselineRule::BoundedRange { lower, upper, lengths } => {
                ThresholdPolicy::bounded(*lower, *upper, lengths.clone())
            }
            BaselineRule::SustainedLow { threshold, min_len } => {
                ThresholdPolicy::sustained_low(*threshold, *min_len)
            }
        }
    }
}

/// Predict a 0/1 label per value by threshold-range extraction.
pub fn predict(values: &[f64], rule: &BaselineRule) -> Vec<u8> {
    let samples: Vec<Sample> = values.iter().map(|v| Sample::new("", Some(*v))).collect();
    let runs = labeling::extractor::threshold_runs(&samples, &rule.as_policy());
    labeling::paint_labels(values.len(), &runs)
}
