//! Shared constants: execution-state tags, CSV headers, default thresholds.

/// State tag while no workload is running.
pub const STATE_IDLE: &str = "idle";

/// State tag during a normal workload.
pub const STATE_WORKING_NORMAL: &str = "working_normal";

/// State tag during an anomalous workload.
pub const STATE_WORKING_ANOMALY: &str = "working_anomaly";

/// Prefix shared by every anomalous workload tag
/// (e.g. `working_anomaly`, `working_anomaly_sleep`).
pub const ANOMALY_TAG_PREFIX: &str = "working_anomaly";

/// State tag during a sleep-timer anomaly.
pub const STATE_WORKING_ANOMALY_SLEEP: &str = "working_anomaly_sleep";

/// State tag emitted once when a simulation shuts down.
pub const STATE_ENDING: &str = "ending_script";

/// Prefix shared by every working state.
pub const WORKING_PREFIX: &str = "working_";

/// Header of raw execution logs: timestamp,state,event_type,event_details,<metric>.
pub const LOG_COLUMN_TIMESTAMP: &str = "timestamp";
pub const LOG_COLUMN_STATE: &str = "state";
pub const LOG_COLUMN_EVENT_TYPE: &str = "event_type";
pub const LOG_COLUMN_EVENT_DETAILS: &str = "event_details";

/// Metric column names the labeler knows how to look up.
pub const METRIC_CPU_PERCENT: &str = "cpu_percent";
pub const METRIC_RAM_USAGE_MB: &str = "ram_usage_mb";

/// Header of labeled training datasets.
pub const DATA_COLUMN: &str = "Data";
pub const LABEL_COLUMN: &str = "Label";

/// Timestamp format used in execution logs.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Sustained-low baseline rule defaults (RAM sleep datasets).
pub const SUSTAINED_LOW_THRESHOLD: f64 = 60.0;
pub const SUSTAINED_LOW_MIN_LEN: usize = 7;

/// Bounded-range baseline rule defaults (medium RAM spike datasets).
pub const BOUNDED_RANGE_LOWER: f64 = 530.0;
pub const BOUNDED_RANGE_UPPER: f64 = 700.0;
pub const BOUNDED_RANGE_LENGTHS: [usize; 2] = [3, 4];
