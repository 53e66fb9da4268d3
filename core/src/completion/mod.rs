//! Cross-thread completion handoff.
//!
//! Responsibilities:
//! - Carry finished async results from worker threads to the host thread
//! - Run them in FIFO order during the host's pump tick
//!
//! Non-responsibilities:
//! - Scheduling or running the codec work itself

pub mod queue;
pub mod types;

pub use queue::CompletionQueue;
pub use types::{Completion, JobOutcome, ResultHandle};
