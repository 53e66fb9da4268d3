use thiserror::Error;

use crate::compression::CodecError;
use crate::config::ConfigError;
use crate::worker::LaunchError;

/// Unified bridge error covering codec, launch, config and thread misuse.
/// - `From<T>` impls enable `?` from every layer.
/// - Host bindings map this onto host-level errors.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Encode/decode failure.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Async job could not be started.
    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Host-only operation called from another thread.
    #[error("{0} must run on the host thread")]
    WrongThread(&'static str),
}
