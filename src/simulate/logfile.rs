use std::fs::File;
use std::path::Path;

use chrono::Local;
use parking_lot::Mutex;

use crate::constants::{
    LOG_COLUMN_EVENT_DETAILS, LOG_COLUMN_EVENT_TYPE, LOG_COLUMN_STATE, LOG_COLUMN_TIMESTAMP,
    LOG_TIMESTAMP_FORMAT,
};
use crate::error::Result;

/// Row kinds appearing in an execution log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEvent {
    ScriptStart,
    WorkloadStart,
    WorkloadEnd,
    SampledState,
    LoggerError,
    ScriptEnd,
}

impl LogEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogEvent::ScriptStart => "SCRIPT_START",
            LogEvent::WorkloadStart => "WORKLOAD_START",
            LogEvent::WorkloadEnd => "WORKLOAD_END",
            LogEvent::SampledState => "SAMPLED_STATE",
            LogEvent::LoggerError => "LOGGER_ERROR",
            LogEvent::ScriptEnd => "SCRIPT_END",
        }
    }
}

/// Mutex-serialized append-only CSV log shared by driver and sampler.
pub struct ExecutionLog {
    writer: Mutex<csv::Writer<File>>,
}

impl ExecutionLog {
    /// Create the log file and write its header. The metric column name
    /// depends on what the run samples (`cpu_percent` or `ram_usage_mb`).
    pub fn create(path: &Path, metric_column: &str) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record([
            LOG_COLUMN_TIMESTAMP,
            LOG_COLUMN_STATE,
            LOG_COLUMN_EVENT_TYPE,
            LOG_COLUMN_EVENT_DETAILS,
            metric_column,
        ])?;
        writer.flush()?;
        Ok(Self {
            writer: Mutex::new(writer),
        })
    }

    /// Append one row. Each append flushes so a crashed run keeps every
    /// sample written so far.
    pub fn append(
        &self,
        state_tag: &str,
        event: LogEvent,
        details: &str,
        metric: Option<f64>,
    ) -> Result<()> {
        let timestamp = Local::now().format(LOG_TIMESTAMP_FORMAT).to_string();
        let metric_cell = metric.map(|v| v.to_string()).unwrap_or_default();

        let mut writer = self.writer.lock();
        writer.write_record([
            timestamp.as_str(),
            state_tag,
            event.as_str(),
            details,
            metric_cell.as_str(),
        ])?;
        writer.flush()?;
        Ok(())
    }
}
