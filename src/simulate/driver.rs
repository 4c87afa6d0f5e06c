//! Foreground workload driver.
//!
//! Runs an initial all-normal period, then a mixed period where a one-in-N
//! draw selects the configured anomaly. State changes are published to the
//! slot BEFORE the matching `WORKLOAD_START` row is written, so the sampler
//! never attributes a workload's samples to the previous state.

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::Result;

use super::config::{AnomalyKind, SimulatorConfig};
use super::logfile::{ExecutionLog, LogEvent};
use super::sampler::MetricSampler;
use super::state::{ExecutionState, RunFlag, StateSlot};
use super::workload::{self, WorkloadSpec};

/// What a finished simulation produced.
#[derive(Debug, Clone, Copy)]
pub struct SimulationReport {
    pub workloads_run: usize,
    pub anomalies_run: usize,
}

/// Run a full simulation to completion.
pub fn run(config: &SimulatorConfig) -> Result<SimulationReport> {
    validate(config)?;

    let log = Arc::new(ExecutionLog::create(&config.log_path, config.metric.column())?);
    let slot = StateSlot::new();
    let flag = RunFlag::new();

    let sampler = MetricSampler::spawn(
        config.metric,
        config.sampler,
        slot.clone(),
        flag.clone(),
        Arc::clone(&log),
    );

    log.append(ExecutionState::Idle.tag(), LogEvent::ScriptStart, "", None)?;
    log::info!(
        "simulation started: total runtime {:?}, initial normal period {:?}, logging to {}",
        config.total_runtime,
        config.initial_normal_period,
        config.log_path.display()
    );

    let start = Instant::now();
    let mut report = SimulationReport {
        workloads_run: 0,
        anomalies_run: 0,
    };

    let result = (|| -> Result<()> {
        // Initial period: normal workloads only.
        while start.elapsed() < config.initial_normal_period {
            run_normal(config, &slot, &log)?;
            report.workloads_run += 1;
        }

        // Mixed period.
        while start.elapsed() < config.total_runtime {
            let anomalous = rand::thread_rng().gen_range(1..=config.anomaly_odds) == 1;
            if anomalous {
                run_anomaly(config, &slot, &log)?;
                report.anomalies_run += 1;
            } else {
                run_normal(config, &slot, &log)?;
            }
            report.workloads_run += 1;
        }
        Ok(())
    })();

    // Shut the sampler down even when a workload failed mid-run.
    slot.publish(ExecutionState::Ending);
    log.append(ExecutionState::Ending.tag(), LogEvent::ScriptEnd, "", None)?;
    flag.stop();
    sampler.join();

    result?;
    log::info!(
        "simulation complete: {} workloads, {} anomalies",
        report.workloads_run,
        report.anomalies_run
    );
    Ok(report)
}

fn run_normal(config: &SimulatorConfig, slot: &StateSlot, log: &ExecutionLog) -> Result<()> {
    let size = pick(&config.normal_sizes);
    let spec = WorkloadSpec {
        size,
        copies: config.normal_copies,
        rounds: config.rounds,
    };
    run_matrix_workload(
        config,
        slot,
        log,
        ExecutionState::WorkingNormal,
        format!("type:normal,size:{size}"),
        spec,
    )
}

fn run_anomaly(config: &SimulatorConfig, slot: &StateSlot, log: &ExecutionLog) -> Result<()> {
    match &config.anomaly {
        AnomalyKind::Spike { sizes, copies } => {
            let size = pick(sizes);
            let spec = WorkloadSpec {
                size,
                copies: *copies,
                rounds: config.rounds,
            };
            run_matrix_workload(
                config,
                slot,
                log,
                ExecutionState::WorkingAnomaly,
                format!("type:anomaly,size:{size}"),
                spec,
            )
        }
        AnomalyKind::SleepIncrease { extra } => {
            // No matrix work at all: the anomaly IS the stretched pause.
            let sleep = config.base_sleep + *extra;
            let details = format!("type:anomaly_sleep_increase,sleep_time:{:.2}s", sleep.as_secs_f64());

            slot.publish(ExecutionState::WorkingAnomalySleep);
            let tag = ExecutionState::WorkingAnomalySleep.tag();
            log.append(tag, LogEvent::WorkloadStart, &details, None)?;
            log.append(
                tag,
                LogEvent::WorkloadEnd,
                &format!("{details},duration:{:.2}s", sleep.as_secs_f64()),
                None,
            )?;

            slot.publish(ExecutionState::Idle);
            thread::sleep(sleep);
            Ok(())
        }
    }
}

fn run_matrix_workload(
    config: &SimulatorConfig,
    slot: &StateSlot,
    log: &ExecutionLog,
    state: ExecutionState,
    details: String,
    spec: WorkloadSpec,
) -> Result<()> {
    slot.publish(state);
    log.append(state.tag(), LogEvent::WorkloadStart, &details, None)?;
    log::debug!("starting workload: {}", details);

    let duration = workload::run(&spec);

    // WORKLOAD_END is written while the state is still working_*.
    log.append(
        state.tag(),
        LogEvent::WorkloadEnd,
        &format!("{details},duration:{:.2}s", duration.as_secs_f64()),
        None,
    )?;

    slot.publish(ExecutionState::Idle);
    thread::sleep(config.base_sleep);
    Ok(())
}

fn pick(sizes: &[usize]) -> usize {
    // Guarded by validate().
    *sizes.choose(&mut rand::thread_rng()).expect("size list validated non-empty")
}

fn validate(config: &SimulatorConfig) -> Result<()> {
    use crate::error::ToolkitError;

    if config.normal_sizes.is_empty() {
        return Err(ToolkitError::InvalidConfig("normal size list is empty".into()));
    }
    if let AnomalyKind::Spike { sizes, .. } = &config.anomaly {
        if sizes.is_empty() {
            return Err(ToolkitError::InvalidConfig("anomaly size list is empty".into()));
        }
    }
    if config.anomaly_odds == 0 {
        return Err(ToolkitError::InvalidConfig("anomaly odds must be at least 1".into()));
    }
    Ok(())
}
