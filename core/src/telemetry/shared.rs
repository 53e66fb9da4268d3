//! telemetry/shared.rs
//! Counters shared between the host thread and workers.
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::telemetry::counters::{CodecCounters, JobCounters};

/// Workers touch this once per job, never inside the codec loop.
#[derive(Debug, Default)]
pub struct SharedCounters {
    codec: Mutex<CodecCounters>,
    jobs: Mutex<JobCounters>,
}

impl SharedCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge_codec(&self, local: &CodecCounters) {
        lock(&self.codec).merge(local);
    }

    pub fn record_launch(&self) {
        lock(&self.jobs).launched += 1;
    }

    pub fn record_outcome(&self, succeeded: bool) {
        let mut jobs = lock(&self.jobs);
        if succeeded {
            jobs.succeeded += 1;
        } else {
            jobs.failed += 1;
        }
    }

    pub fn record_drained(&self, n: usize) {
        lock(&self.jobs).drained += n as u64;
    }

    pub fn codec(&self) -> CodecCounters {
        lock(&self.codec).clone()
    }

    pub fn jobs(&self) -> JobCounters {
        lock(&self.jobs).clone()
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
