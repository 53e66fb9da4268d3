use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compression::Direction;

/// Per-bridge job number, used in thread names and logs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One async request, owned by its worker.
#[derive(Debug)]
pub struct Job {
    pub id: JobId,
    pub direction: Direction,
    pub input: Vec<u8>,
}

/// What the host sees when an async job fails.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorDelivery {
    /// The failure reaches the result handle as `Err`.
    #[default]
    Callback,
    /// The failure is logged and the handle is released undelivered.
    LogOnly,
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("launcher is shut down")]
    ShutDown,
}
