//! telemetry/snapshot.rs
//!
//! Immutable telemetry view handed to hosts.
use serde::{Deserialize, Serialize};

use crate::telemetry::counters::{CodecCounters, JobCounters};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub codec: CodecCounters,
    pub jobs: JobCounters,
    pub jobs_in_flight: usize,
    pub completions_pending: usize,
    pub compression_ratio: f64,
}

impl TelemetrySnapshot {
    pub fn from(
        codec: &CodecCounters,
        jobs: &JobCounters,
        jobs_in_flight: usize,
        completions_pending: usize,
    ) -> Self {
        Self {
            codec: codec.clone(),
            jobs: jobs.clone(),
            jobs_in_flight,
            completions_pending,
            compression_ratio: codec.compression_ratio(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Every launched job has been accounted for, one way or the other.
    pub fn is_settled(&self) -> bool {
        self.jobs_in_flight == 0
            && self.completions_pending == 0
            && self.jobs.drained == self.jobs.succeeded + self.jobs.failed
    }
}
