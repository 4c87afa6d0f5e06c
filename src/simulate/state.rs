//! Execution state handoff between the driver and the sampler.
//!
//! Single writer (the driver), single reader (the sampler). The slot only
//! needs to make the latest published value eventually visible; one sampler
//! tick of staleness is acceptable.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::constants::{
    STATE_ENDING, STATE_IDLE, STATE_WORKING_ANOMALY, STATE_WORKING_ANOMALY_SLEEP,
    STATE_WORKING_NORMAL, WORKING_PREFIX,
};

/// What the driver is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Idle,
    WorkingNormal,
    WorkingAnomaly,
    WorkingAnomalySleep,
    Ending,
}

impl ExecutionState {
    pub fn tag(&self) -> &'static str {
        match self {
            ExecutionState::Idle => STATE_IDLE,
            ExecutionState::WorkingNormal => STATE_WORKING_NORMAL,
            ExecutionState::WorkingAnomaly => STATE_WORKING_ANOMALY,
            ExecutionState::WorkingAnomalySleep => STATE_WORKING_ANOMALY_SLEEP,
            ExecutionState::Ending => STATE_ENDING,
        }
    }

    pub fn is_working(&self) -> bool {
        self.tag().starts_with(WORKING_PREFIX)
    }
}

/// Atomic slot holding the latest published execution state.
#[derive(Debug, Clone)]
pub struct StateSlot {
    inner: Arc<RwLock<ExecutionState>>,
}

impl StateSlot {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ExecutionState::Idle)),
        }
    }

    pub fn publish(&self, state: ExecutionState) {
        *self.inner.write() = state;
    }

    pub fn snapshot(&self) -> ExecutionState {
        *self.inner.read()
    }
}

impl Default for StateSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared keep-running flag for the sampler thread.
#[derive(Debug, Clone)]
pub struct RunFlag {
    inner: Arc<AtomicBool>,
}

impl RunFlag {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn stop(&self) {
        self.inner.store(false, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }
}

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}
