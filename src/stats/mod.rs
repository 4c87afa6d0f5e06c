//! Dataset statistics and report generation.

pub mod latex;

#[cfg(test)]
mod tests;

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::dataset;
use crate::error::Result;

/// Anomaly-run statistics over a labeled dataset.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnomalyStats {
    pub total_sequences: usize,
    pub total_anomaly_points: usize,
    pub average_length: f64,
    pub longest_length: usize,
    pub shortest_length: usize,
    pub anomaly_ratio: f64,
}

/// Scan the label array for contiguous anomaly runs and summarize them.
///
/// A run starts at a 0->1 edge and ends at a 1->0 edge; a dataset ending
/// inside a run closes that run at the last index.
pub fn anomaly_stats(labels: &[u8]) -> AnomalyStats {
    let mut lengths = Vec::new();
    let mut run = 0usize;
    for &label in labels {
        if label == 1 {
            run += 1;
        } else if run > 0 {
            lengths.push(run);
            run = 0;
        }
    }
    if run > 0 {
        lengths.push(run);
    }

    let total_points: usize = lengths.iter().sum();
    let total = labels.len().max(1);

    AnomalyStats {
        total_sequences: lengths.len(),
        total_anomaly_points: total_points,
        average_length: if lengths.is_empty() {
            0.0
        } else {
            total_points as f64 / lengths.len() as f64
        },
        longest_length: lengths.iter().copied().max().unwrap_or(0),
        shortest_length: lengths.iter().copied().min().unwrap_or(0),
        anomaly_ratio: total_points as f64 / total as f64,
    }
}

impl AnomalyStats {
    /// Plain-text report, one metric per line.
    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Dataset Anomaly Statistics");
        let _ = writeln!(out, "=========================");
        let _ = writeln!(out);
        let _ = writeln!(out, "Total Anomaly Sequences: {}", self.total_sequences);
        let _ = writeln!(out, "Total Anomaly Points: {}", self.total_anomaly_points);
        let _ = writeln!(out, "Average Anomaly Length: {:.2}", self.average_length);
        let _ = writeln!(out, "Longest Anomaly Length: {}", self.longest_length);
        let _ = writeln!(out, "Shortest Anomaly Length: {}", self.shortest_length);
        let _ = writeln!(out, "Anomaly Ratio: {:.4}", self.anomaly_ratio);
        out
    }
}

/// Batch transform: labeled dataset in, stats report out.
pub fn write_stats_report(input: &Path, output: &Path) -> Result<AnomalyStats> {
    let (_, labels) = dataset::read_labeled_dataset(input)?;
    if labels.is_empty() {
        log::info!("nothing to process: no valid rows in {}", input.display());
    }
    let stats = anomaly_stats(&labels);
    std::fs::write(output, stats.report())?;
    log::info!("stats for {} written to {}", input.display(), output.display());
    Ok(stats)
}
