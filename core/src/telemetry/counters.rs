//! telemetry/counters.rs
//! Mutable counters collected by codec calls and async jobs.
//!
//! Summary: each call fills a local `CodecCounters`; workers merge theirs into
//! the shared copy once per job, so the hot loop never takes a lock.
use std::ops::AddAssign;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::compression::Direction;

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecCounters {
    pub encode_calls: u64,
    pub decode_calls: u64,
    pub failures: u64,
    pub encode_bytes_in: u64,
    pub encode_bytes_out: u64,
    pub decode_bytes_in: u64,
    pub decode_bytes_out: u64,
    /// Output reallocations performed while streaming.
    pub buffer_growths: u64,
    pub encode_time: Duration,
    pub decode_time: Duration,
}

impl CodecCounters {
    /// Record one successful call.
    pub fn add_call(&mut self, direction: Direction, bytes_in: usize, bytes_out: usize, elapsed: Duration) {
        match direction {
            Direction::Encode => {
                self.encode_calls += 1;
                self.encode_time += elapsed;
                self.encode_bytes_in += bytes_in as u64;
                self.encode_bytes_out += bytes_out as u64;
            }
            Direction::Decode => {
                self.decode_calls += 1;
                self.decode_time += elapsed;
                self.decode_bytes_in += bytes_in as u64;
                self.decode_bytes_out += bytes_out as u64;
            }
        }
    }

    pub fn add_failure(&mut self, direction: Direction) {
        match direction {
            Direction::Encode => self.encode_calls += 1,
            Direction::Decode => self.decode_calls += 1,
        }
        self.failures += 1;
    }

    pub fn add_growth(&mut self) {
        self.buffer_growths += 1;
    }

    /// Frame bytes per plaintext byte over all encode calls; 0 when nothing was encoded.
    pub fn compression_ratio(&self) -> f64 {
        if self.encode_bytes_in == 0 {
            return 0.0;
        }
        self.encode_bytes_out as f64 / self.encode_bytes_in as f64
    }

    pub fn merge(&mut self, other: &CodecCounters) {
        self.encode_calls += other.encode_calls;
        self.decode_calls += other.decode_calls;
        self.failures += other.failures;
        self.encode_bytes_in += other.encode_bytes_in;
        self.encode_bytes_out += other.encode_bytes_out;
        self.decode_bytes_in += other.decode_bytes_in;
        self.decode_bytes_out += other.decode_bytes_out;
        self.buffer_growths += other.buffer_growths;
        self.encode_time += other.encode_time;
        self.decode_time += other.decode_time;
    }
}

impl AddAssign for CodecCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}

/// Async job bookkeeping kept by the launcher and the bridge.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCounters {
    pub launched: u64,
    pub succeeded: u64,
    pub failed: u64,
    /// Completion closures executed by the pump.
    pub drained: u64,
}
