//! Background metric sampler.
//!
//! Polls the state slot every tick and decides, via [`LogGate`], whether to
//! append a `SAMPLED_STATE` row. The gate enforces a 1s minimum spacing, a
//! short wait after a newly detected workload start (so the first sample
//! reflects the workload, not the transition), and optionally a short wait
//! after a workload end.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use sysinfo::System;

use super::config::{MetricKind, SamplerConfig};
use super::logfile::{ExecutionLog, LogEvent};
use super::state::{RunFlag, StateSlot};

/// Pure decision logic for when a sample may be logged.
#[derive(Debug)]
pub struct LogGate {
    config: SamplerConfig,
    last_log: Option<Instant>,
    previous_working: bool,
    workload_started_at: Option<Instant>,
    workload_ended_at: Option<Instant>,
}

impl LogGate {
    pub fn new(config: SamplerConfig) -> Self {
        Self {
            config,
            last_log: None,
            previous_working: false,
            workload_started_at: None,
            workload_ended_at: None,
        }
    }

    /// Feed one tick observation; returns whether to log a sample now.
    pub fn observe(&mut self, now: Instant, working: bool) -> bool {
        // Track workload transitions as this thread sees them.
        if working && !self.previous_working {
            self.workload_started_at = Some(now);
            self.workload_ended_at = None;
        } else if !working && self.previous_working {
            self.workload_started_at = None;
            self.workload_ended_at = Some(now);
        }
        self.previous_working = working;

        let interval_met = self
            .last_log
            .map_or(true, |last| now.duration_since(last) >= self.config.min_log_interval);
        if !interval_met {
            return false;
        }

        if working {
            // Wait out the start delay once per detected workload; the start
            // instant stays set while the workload runs, so later samples of
            // the same workload pass immediately.
            return self
                .workload_started_at
                .map_or(true, |started| now.duration_since(started) >= self.config.workload_start_delay);
        }

        if let (Some(delay), Some(ended)) = (self.config.workload_end_delay, self.workload_ended_at) {
            if now.duration_since(ended) >= delay {
                // Consume so only the first post-workload sample is delayed.
                self.workload_ended_at = None;
                return true;
            }
            return false;
        }

        true
    }

    /// Record a successful log write.
    pub fn mark_logged(&mut self, now: Instant) {
        self.last_log = Some(now);
    }
}

/// Owns the sampler thread.
pub struct MetricSampler {
    handle: JoinHandle<()>,
}

impl MetricSampler {
    /// Start sampling in the background until the run flag is cleared.
    pub fn spawn(
        metric: MetricKind,
        config: SamplerConfig,
        slot: StateSlot,
        flag: RunFlag,
        log: Arc<ExecutionLog>,
    ) -> Self {
        let handle = thread::spawn(move || {
            log::info!("sampler thread started ({:?})", metric);
            let mut sys = System::new();
            // Prime the CPU counters; the first reading after a fresh System
            // is always zero.
            sys.refresh_cpu();

            let mut gate = LogGate::new(config);
            while flag.is_set() {
                let now = Instant::now();
                let state = slot.snapshot();

                if gate.observe(now, state.is_working()) {
                    match read_metric(&mut sys, metric) {
                        Some(value) => {
                            if let Err(e) = log.append(state.tag(), LogEvent::SampledState, "", Some(value)) {
                                log::error!("failed to append sample: {}", e);
                            }
                            gate.mark_logged(now);
                        }
                        None => {
                            let _ = log.append("error", LogEvent::LoggerError, "failed to read metric", None);
                        }
                    }
                }

                thread::sleep(config.tick);
            }
            log::info!("sampler thread stopped");
        });

        Self { handle }
    }

    pub fn join(self) {
        if self.handle.join().is_err() {
            log::error!("sampler thread panicked");
        }
    }
}

fn read_metric(sys: &mut System, metric: MetricKind) -> Option<f64> {
    match metric {
        MetricKind::Cpu => {
            sys.refresh_cpu();
            let cpus = sys.cpus();
            if cpus.is_empty() {
                return None;
            }
            Some(cpus.iter().map(|c| c.cpu_usage() as f64).sum::<f64>() / cpus.len() as f64)
        }
        MetricKind::Ram => {
            let pid = sysinfo::get_current_pid().ok()?;
            sys.refresh_process(pid);
            sys.process(pid).map(|p| p.memory() as f64 / 1024.0 / 1024.0)
        }
    }
}
