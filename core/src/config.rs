//! config.rs
//! Bridge configuration, loadable from JSON.
//!
//! Every field is optional in JSON; missing fields take the defaults below.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compression::FramePreferences;
use crate::constants::{DEFAULT_WORKER_PREFIX, MAX_CHUNK_SIZE, MAX_COMPRESSION_LEVEL};
use crate::worker::ErrorDelivery;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub frame: FramePreferences,
    pub error_delivery: ErrorDelivery,
    /// Worker threads are named `<prefix>-<job id>`.
    pub worker_name_prefix: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            frame: FramePreferences::default(),
            error_delivery: ErrorDelivery::default(),
            worker_name_prefix: DEFAULT_WORKER_PREFIX.to_owned(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl BridgeConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: BridgeConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let frame = &self.frame;
        if frame.compression_level > MAX_COMPRESSION_LEVEL {
            return Err(ConfigError::Invalid(format!(
                "compression_level {} > {}",
                frame.compression_level, MAX_COMPRESSION_LEVEL
            )));
        }
        if frame.chunk_size == 0 || frame.chunk_size > MAX_CHUNK_SIZE {
            return Err(ConfigError::Invalid(format!(
                "chunk_size {} outside 1..={}",
                frame.chunk_size, MAX_CHUNK_SIZE
            )));
        }
        if self.worker_name_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("worker_name_prefix is empty".into()));
        }
        Ok(())
    }
}
