//! compression/types.rs
//! Codec preferences, direction tags and the codec error type.
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_COMPRESSION_LEVEL};
use crate::headers::{BlockSizeClass, HeaderError};

/// Which way a buffer goes through the codec.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Encode,
    Decode,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Encode => f.write_str("encode"),
            Direction::Decode => f.write_str("decode"),
        }
    }
}

/// Step of the streaming loop that failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Header,
    Begin,
    Update,
    End,
    Worker,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Header => "header",
            Stage::Begin  => "begin",
            Stage::Update => "update",
            Stage::End    => "end",
            Stage::Worker => "worker",
        };
        f.write_str(s)
    }
}

/// Coarse error class, used by host bindings to pick an exception type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Context,
    Stream,
}

/// Failure of a single encode or decode call.
///
/// `message` is the native diagnostic (`LZ4F_getErrorName`) or the header
/// parser's description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("{direction} context creation failed: {message}")]
    Context { direction: Direction, message: String },

    #[error("{direction} {stage} failed: {message}")]
    Stream { direction: Direction, stage: Stage, message: String },
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::Context { .. } => ErrorKind::Context,
            CodecError::Stream { .. } => ErrorKind::Stream,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            CodecError::Context { direction, .. } | CodecError::Stream { direction, .. } => *direction,
        }
    }

    pub(crate) fn stream(direction: Direction, stage: Stage, message: impl Into<String>) -> Self {
        CodecError::Stream { direction, stage, message: message.into() }
    }
}

impl From<HeaderError> for CodecError {
    fn from(e: HeaderError) -> Self {
        CodecError::stream(Direction::Decode, Stage::Header, e.to_string())
    }
}

/// Frame preferences used by the encoder.
///
/// Every field has a default so partial JSON configs stay valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramePreferences {
    pub block_size: BlockSizeClass,
    /// Linked blocks let later blocks reference earlier ones.
    pub linked_blocks: bool,
    pub content_checksum: bool,
    pub block_checksum: bool,
    /// 0..=2 is fast mode, 3 and above is high-compression.
    pub compression_level: u32,
    /// Write the input length into the frame header.
    pub declare_content_size: bool,
    /// Bytes handed to each native update call.
    pub chunk_size: usize,
}

impl Default for FramePreferences {
    fn default() -> Self {
        Self {
            block_size: BlockSizeClass::Max64KB,
            linked_blocks: true,
            content_checksum: true,
            block_checksum: false,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            declare_content_size: true,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}
