use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::WORKING_PREFIX;

/// One observation from a raw execution log.
///
/// `value` is `None` when the metric cell was empty or unparseable; such
/// samples never reach the output but still participate in state-tag run
/// detection (state is always present).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: Option<NaiveDateTime>,
    pub state: String,
    pub value: Option<f64>,
}

impl Sample {
    pub fn new(state: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            timestamp: None,
            state: state.into(),
            value,
        }
    }

    /// Whether the sample was taken while any workload was running.
    pub fn is_working(&self) -> bool {
        self.state.starts_with(WORKING_PREFIX)
    }
}

/// One row of a supervised training dataset (`Data,Label`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSample {
    #[serde(rename = "Data")]
    pub value: f64,
    #[serde(rename = "Label")]
    pub label: u8,
}

impl LabeledSample {
    pub fn new(value: f64, label: u8) -> Self {
        Self { value, label }
    }
}
