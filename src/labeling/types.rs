use serde::{Deserialize, Serialize};

use crate::constants::{ANOMALY_TAG_PREFIX, STATE_IDLE, STATE_WORKING_ANOMALY, STATE_WORKING_ANOMALY_SLEEP};

/// Why an interval was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reason {
    /// The samples carried a designated anomaly state tag.
    StateTag,
    /// The values sat strictly inside a configured open range.
    ThresholdRange,
    /// Neutral-state samples absorbed around a detected run.
    GracePeriod,
}

/// A contiguous `[start, end]` index span flagged anomalous (inclusive ends).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: usize,
    pub end: usize,
    pub reason: Reason,
}

impl Interval {
    pub fn new(start: usize, end: usize, reason: Reason) -> Self {
        debug_assert!(start <= end);
        Self { start, end, reason }
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Flag maximal runs of a designated anomaly state tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateTagPolicy {
    pub tag: String,
    /// Match any state starting with `tag` instead of requiring equality.
    #[serde(default)]
    pub match_prefix: bool,
}

impl StateTagPolicy {
    pub fn exact(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            match_prefix: false,
        }
    }

    pub fn prefix(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            match_prefix: true,
        }
    }

    pub fn matches(&self, state: &str) -> bool {
        if self.match_prefix {
            state.starts_with(self.tag.as_str())
        } else {
            state == self.tag
        }
    }
}

/// Which run lengths a threshold policy accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunAcceptance {
    /// Accept exactly these lengths; shorter AND longer runs are rejected whole.
    Lengths(Vec<usize>),
    /// Accept runs strictly longer than the floor.
    LongerThan(usize),
}

impl RunAcceptance {
    pub fn accepts(&self, len: usize) -> bool {
        match self {
            RunAcceptance::Lengths(lens) => lens.contains(&len),
            RunAcceptance::LongerThan(floor) => len > *floor,
        }
    }
}

/// Flag maximal runs of values strictly inside an open range.
///
/// Either bound may be absent: a sustained-low rule is `upper` only.
/// A sample with a missing value always breaks a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdPolicy {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub acceptance: RunAcceptance,
}

impl ThresholdPolicy {
    pub fn bounded(lower: f64, upper: f64, lengths: Vec<usize>) -> Self {
        Self {
            lower: Some(lower),
            upper: Some(upper),
            acceptance: RunAcceptance::Lengths(lengths),
        }
    }

    pub fn sustained_low(upper: f64, min_len: usize) -> Self {
        Self {
            lower: None,
            upper: Some(upper),
            acceptance: RunAcceptance::LongerThan(min_len),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower.map_or(true, |lo| value > lo) && self.upper.map_or(true, |hi| value < hi)
    }
}

/// Absorb adjacent neutral-state samples around runs of a designated tag.
///
/// Models the sleep-timer afterglow: the simulated system keeps misbehaving
/// through a few "idle" samples on either side of a sleep anomaly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GracePolicy {
    pub tag: String,
    #[serde(default)]
    pub match_prefix: bool,
    pub neutral_tag: String,
}

impl GracePolicy {
    pub fn sleep_idle() -> Self {
        Self {
            tag: STATE_WORKING_ANOMALY_SLEEP.to_string(),
            match_prefix: false,
            neutral_tag: STATE_IDLE.to_string(),
        }
    }

    pub(crate) fn as_state_policy(&self) -> StateTagPolicy {
        StateTagPolicy {
            tag: self.tag.clone(),
            match_prefix: self.match_prefix,
        }
    }
}

/// Full engine configuration. Policies are independently selectable and
/// combined by OR-union at labeling time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelingConfig {
    #[serde(default)]
    pub state_policies: Vec<StateTagPolicy>,
    #[serde(default)]
    pub threshold_policies: Vec<ThresholdPolicy>,
    #[serde(default)]
    pub grace_policies: Vec<GracePolicy>,
    #[serde(default)]
    pub propagate_successor: bool,
}

impl LabelingConfig {
    /// CPU load datasets: exact anomaly tag, forward propagation by one.
    pub fn cpu_load() -> Self {
        Self {
            state_policies: vec![StateTagPolicy::exact(STATE_WORKING_ANOMALY)],
            threshold_policies: Vec::new(),
            grace_policies: Vec::new(),
            propagate_successor: true,
        }
    }

    /// CPU sleep datasets: exact anomaly tag, no propagation at all.
    pub fn cpu_sleep() -> Self {
        Self {
            state_policies: vec![StateTagPolicy::exact(STATE_WORKING_ANOMALY)],
            threshold_policies: Vec::new(),
            grace_policies: Vec::new(),
            propagate_successor: false,
        }
    }

    /// RAM datasets: any `working_anomaly*` tag plus idle absorption around
    /// sleep anomalies.
    pub fn ram_sleep() -> Self {
        Self {
            state_policies: vec![StateTagPolicy::prefix(ANOMALY_TAG_PREFIX)],
            threshold_policies: Vec::new(),
            grace_policies: vec![GracePolicy::sleep_idle()],
            propagate_successor: false,
        }
    }
}
