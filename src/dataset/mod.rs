//! Dataset IO - typed loading of raw execution logs and labeled datasets.
//!
//! The input schema is validated once at load time; a missing column is a
//! fatal error, a malformed metric cell is a per-row skip.

pub mod reader;
pub mod record;
pub mod writer;

#[cfg(test)]
mod tests;

pub use reader::{read_execution_log, read_labeled_dataset};
pub use record::{LabeledSample, Sample};
pub use writer::write_training_data;
