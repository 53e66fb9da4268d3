//! telemetry/mod.rs
//! Counters and immutable snapshots for codec calls and async jobs.
//!
//! Notes:
//! - Counters are plain structs merged at call/job boundaries.
//! - Snapshots are serde-serialisable so hosts can log or display them as JSON.

pub mod counters;
pub mod snapshot;
pub mod shared;

pub use counters::*;
pub use snapshot::*;
pub use shared::*;
