//! lz4-bridge-core
//!
//! LZ4 frame codec with a cross-thread completion queue and async job launcher.
//! No Python, no PyO3. Host bindings live in their own crate.

#![deny(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod config;

// Codec
pub mod headers;
pub mod compression;

// Async plumbing
pub mod completion;
pub mod worker;
pub mod telemetry;

pub mod bridge;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::bridge::Bridge;
    pub use crate::completion::{CompletionQueue, JobOutcome, ResultHandle};
    pub use crate::compression::{decode, encode, inspect, CodecError, Direction, ErrorKind, FrameCodec, FramePreferences};
    pub use crate::config::{BridgeConfig, ConfigError};
    pub use crate::headers::{BlockSizeClass, FrameDescriptor};
    pub use crate::telemetry::TelemetrySnapshot;
    pub use crate::types::BridgeError;
    pub use crate::worker::{ErrorDelivery, JobId, LaunchError};
}
