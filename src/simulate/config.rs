use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{METRIC_CPU_PERCENT, METRIC_RAM_USAGE_MB};

/// Which measurement the sampler records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Whole-system CPU usage, averaged over cores.
    Cpu,
    /// Resident set size of this process, in MB.
    Ram,
}

impl MetricKind {
    pub fn column(&self) -> &'static str {
        match self {
            MetricKind::Cpu => METRIC_CPU_PERCENT,
            MetricKind::Ram => METRIC_RAM_USAGE_MB,
        }
    }
}

/// How an anomalous round differs from a normal one.
#[derive(Debug, Clone)]
pub enum AnomalyKind {
    /// Larger matrices (and, for RAM runs, more of them held live).
    Spike { sizes: Vec<usize>, copies: usize },
    /// Skip the matrix work entirely and sleep longer than usual.
    SleepIncrease { extra: Duration },
}

/// Sampler timing knobs.
#[derive(Debug, Clone, Copy)]
pub struct SamplerConfig {
    /// Polling interval of the background loop.
    pub tick: Duration,
    /// Minimum spacing between logged samples.
    pub min_log_interval: Duration,
    /// Wait after a newly detected workload start before its first sample.
    pub workload_start_delay: Duration,
    /// Optional wait after a workload end before the first idle sample
    /// (used by the RAM runs so the allocator has settled).
    pub workload_end_delay: Option<Duration>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(100),
            min_log_interval: Duration::from_secs(1),
            workload_start_delay: Duration::from_millis(300),
            workload_end_delay: None,
        }
    }
}

/// Full simulation parameters.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    pub metric: MetricKind,
    /// Matrix sizes drawn for normal workloads.
    pub normal_sizes: Vec<usize>,
    /// Matrices held live per normal workload.
    pub normal_copies: usize,
    /// Multiplication rounds per workload.
    pub rounds: usize,
    pub anomaly: AnomalyKind,
    /// One-in-N draw per mixed-period round triggers the anomaly.
    pub anomaly_odds: u32,
    /// Idle pause between workloads.
    pub base_sleep: Duration,
    pub total_runtime: Duration,
    /// Leading all-normal stretch before anomalies may fire.
    pub initial_normal_period: Duration,
    pub sampler: SamplerConfig,
    pub log_path: PathBuf,
}

impl SimulatorConfig {
    /// CPU-load run: sustained multiplications, spikes via larger matrices.
    pub fn cpu_default(log_path: PathBuf) -> Self {
        Self {
            metric: MetricKind::Cpu,
            normal_sizes: vec![2800, 3000, 3200, 3400],
            normal_copies: 2,
            rounds: 5,
            anomaly: AnomalyKind::Spike {
                sizes: vec![5000],
                copies: 2,
            },
            anomaly_odds: 50,
            base_sleep: Duration::from_secs(4),
            total_runtime: Duration::from_secs(110 * 60),
            initial_normal_period: Duration::from_secs(15 * 60),
            sampler: SamplerConfig::default(),
            log_path,
        }
    }

    /// RAM-usage run: bigger allocations, post-workload sampling delay.
    pub fn ram_default(log_path: PathBuf) -> Self {
        Self {
            metric: MetricKind::Ram,
            normal_sizes: vec![3000, 4000, 5000, 6000],
            normal_copies: 3,
            rounds: 5,
            anomaly: AnomalyKind::Spike {
                sizes: vec![8000],
                copies: 4,
            },
            anomaly_odds: 50,
            base_sleep: Duration::from_secs(4),
            total_runtime: Duration::from_secs(110 * 60),
            initial_normal_period: Duration::from_secs(25 * 60),
            sampler: SamplerConfig {
                workload_end_delay: Some(Duration::from_millis(100)),
                ..SamplerConfig::default()
            },
            log_path,
        }
    }

    /// RAM run whose anomaly is a stretched sleep timer instead of a spike.
    pub fn ram_sleep_default(log_path: PathBuf) -> Self {
        Self {
            anomaly: AnomalyKind::SleepIncrease {
                extra: Duration::from_secs(2),
            },
            ..Self::ram_default(log_path)
        }
    }
}
