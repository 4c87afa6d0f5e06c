//! tsad-toolkit - synthetic time-series anomaly datasets, end to end.
//!
//! Four loosely coupled subsystems share one data model:
//! - [`simulate`] drives matrix workloads while a background sampler logs
//!   `(state, metric)` rows to an execution log,
//! - [`labeling`] converts execution logs into supervised `Data,Label`
//!   datasets via configurable interval-extraction and propagation policies,
//! - [`detect`] scores rule-based sanity baselines against labeled datasets,
//! - [`stats`] and [`bench`] summarize datasets and benchmark results.

pub mod bench;
pub mod constants;
pub mod dataset;
pub mod detect;
pub mod error;
pub mod labeling;
pub mod simulate;
pub mod stats;

pub use error::{Result, ToolkitError};
