use std::sync::Arc;
use std::time::{Duration, Instant};

use tempfile::tempdir;

use crate::constants::METRIC_CPU_PERCENT;
use crate::dataset::read_execution_log;

use super::config::SamplerConfig;
use super::logfile::{ExecutionLog, LogEvent};
use super::sampler::LogGate;
use super::state::{ExecutionState, RunFlag, StateSlot};

fn gate_config() -> SamplerConfig {
    SamplerConfig {
        tick: Duration::from_millis(100),
        min_log_interval: Duration::from_secs(1),
        workload_start_delay: Duration::from_millis(300),
        workload_end_delay: None,
    }
}

#[test]
fn gate_allows_first_idle_sample_immediately() {
    let mut gate = LogGate::new(gate_config());
    assert!(gate.observe(Instant::now(), false));
}

#[test]
fn gate_enforces_min_interval() {
    let base = Instant::now();
    let mut gate = LogGate::new(gate_config());

    assert!(gate.observe(base, false));
    gate.mark_logged(base);

    assert!(!gate.observe(base + Duration::from_millis(500), false));
    assert!(gate.observe(base + Duration::from_millis(1100), false));
}

#[test]
fn gate_delays_first_sample_of_a_new_workload() {
    let base = Instant::now();
    let mut gate = LogGate::new(gate_config());

    assert!(gate.observe(base, false));
    gate.mark_logged(base);

    // Workload starts at +1.1s; interval is met but the 300ms start delay
    // is not, so the tick right after the transition must not log.
    let start = base + Duration::from_millis(1100);
    assert!(!gate.observe(start, true));

    // 300ms after the detected start, logging resumes.
    assert!(gate.observe(start + Duration::from_millis(300), true));
}

#[test]
fn gate_start_delay_applies_once_per_workload() {
    let base = Instant::now();
    let mut gate = LogGate::new(gate_config());

    let start = base + Duration::from_secs(2);
    gate.observe(start, true);
    let first = start + Duration::from_millis(400);
    assert!(gate.observe(first, true));
    gate.mark_logged(first);

    // Later samples of the same workload only wait for the 1s interval.
    assert!(gate.observe(first + Duration::from_millis(1000), true));
}

#[test]
fn gate_end_delay_gates_only_the_first_idle_sample() {
    let config = SamplerConfig {
        workload_end_delay: Some(Duration::from_millis(100)),
        ..gate_config()
    };
    let base = Instant::now();
    let mut gate = LogGate::new(config);

    // Enter and leave a workload.
    gate.observe(base, true);
    let end = base + Duration::from_secs(2);
    assert!(!gate.observe(end + Duration::from_millis(50), false));
    assert!(gate.observe(end + Duration::from_millis(150), false));

    // Delay consumed: subsequent idle samples follow the plain interval.
    let later = end + Duration::from_millis(200);
    gate.mark_logged(later);
    assert!(gate.observe(later + Duration::from_secs(1), false));
}

#[test]
fn state_slot_hands_latest_value_to_reader() {
    let slot = StateSlot::new();
    assert_eq!(slot.snapshot(), ExecutionState::Idle);

    let writer = slot.clone();
    writer.publish(ExecutionState::WorkingAnomaly);
    assert_eq!(slot.snapshot(), ExecutionState::WorkingAnomaly);
    assert!(slot.snapshot().is_working());
}

#[test]
fn run_flag_stops_across_clones() {
    let flag = RunFlag::new();
    let shared = flag.clone();
    assert!(shared.is_set());
    flag.stop();
    assert!(!shared.is_set());
}

#[test]
fn execution_log_rows_read_back_as_samples() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("execution_log.csv");

    let log = Arc::new(ExecutionLog::create(&path, METRIC_CPU_PERCENT).unwrap());
    log.append("idle", LogEvent::ScriptStart, "", None).unwrap();
    log.append("working_normal", LogEvent::WorkloadStart, "type:normal,size:3000", None)
        .unwrap();
    log.append("working_normal", LogEvent::SampledState, "", Some(87.5)).unwrap();
    log.append("ending_script", LogEvent::ScriptEnd, "", None).unwrap();

    let samples = read_execution_log(&path, METRIC_CPU_PERCENT).unwrap();
    assert_eq!(samples.len(), 4);
    assert_eq!(samples[2].state, "working_normal");
    assert_eq!(samples[2].value, Some(87.5));
    // Event rows carry no metric.
    assert_eq!(samples[1].value, None);
}

#[test]
fn execution_states_map_to_the_expected_tags() {
    assert_eq!(ExecutionState::Idle.tag(), "idle");
    assert_eq!(ExecutionState::WorkingAnomalySleep.tag(), "working_anomaly_sleep");
    assert!(!ExecutionState::Ending.is_working());
    assert!(ExecutionState::WorkingNormal.is_working());
}
