//! Async job launcher.
//!
//! Responsibilities:
//! - Run one codec call per worker thread, off the host thread
//! - Hand exactly one completion per job to the completion queue
//! - Track workers so shutdown can join them
//!
//! Non-responsibilities:
//! - Delivering results (the host pump does that)
//! - Cancellation

pub mod launcher;
pub mod types;

pub use launcher::JobLauncher;
pub use types::{ErrorDelivery, Job, JobId, LaunchError};
