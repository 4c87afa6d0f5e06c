//! Workload simulator.
//!
//! One parameterized component replacing the family of near-duplicate
//! generation scripts: a foreground driver runs matrix workloads and
//! publishes its execution state into an atomic slot, while a background
//! sampler thread reads the latest state each tick and appends timestamped
//! `(state, metric)` rows to a mutex-serialized execution log.

pub mod config;
pub mod driver;
pub mod logfile;
pub mod sampler;
pub mod state;
pub mod workload;

#[cfg(test)]
mod tests;

pub use config::{AnomalyKind, MetricKind, SamplerConfig, SimulatorConfig};
pub use driver::{run, SimulationReport};
pub use logfile::{ExecutionLog, LogEvent};
pub use sampler::{LogGate, MetricSampler};
pub use state::{ExecutionState, RunFlag, StateSlot};
