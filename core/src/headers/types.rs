//! headers/types.rs
//! Typed view of an LZ4 frame descriptor.
//!
//! Notes:
//! - Only the descriptor is modelled; block data and the end mark stay opaque.
//! - Multi-byte fields are little-endian on the wire.

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Block maximum size class as encoded in BD bits 6-4.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
pub enum BlockSizeClass {
    #[default]
    #[serde(rename = "64kb")]
    Max64KB  = 4,
    #[serde(rename = "256kb")]
    Max256KB = 5,
    #[serde(rename = "1mb")]
    Max1MB   = 6,
    #[serde(rename = "4mb")]
    Max4MB   = 7,
}

impl BlockSizeClass {
    /// Maximum uncompressed bytes held by one block of this class.
    pub const fn max_block_len(self) -> usize {
        match self {
            BlockSizeClass::Max64KB  => 64 * 1024,
            BlockSizeClass::Max256KB => 256 * 1024,
            BlockSizeClass::Max1MB   => 1024 * 1024,
            BlockSizeClass::Max4MB   => 4 * 1024 * 1024,
        }
    }
}

bitflags::bitflags! {
    /// FLG byte, minus the two version bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FrameFlags: u8 {
        /// Blocks are independent (clear = linked).
        const BLOCK_INDEPENDENT = 0b0010_0000;
        /// Each block carries its own checksum.
        const BLOCK_CHECKSUM    = 0b0001_0000;
        /// An 8-byte content size follows BD.
        const CONTENT_SIZE      = 0b0000_1000;
        /// A content checksum follows the end mark.
        const CONTENT_CHECKSUM  = 0b0000_0100;
        /// Must be zero.
        const RESERVED          = 0b0000_0010;
        /// A 4-byte dictionary id follows the content size.
        const DICT_ID           = 0b0000_0001;
    }
}

/// Parsed frame descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameDescriptor {
    pub version: u8,
    pub block_size: BlockSizeClass,
    pub linked_blocks: bool,
    pub block_checksum: bool,
    pub content_checksum: bool,
    /// Declared uncompressed size. `None` when the encoder did not declare one.
    pub content_size: Option<u64>,
    pub dict_id: Option<u32>,
    /// Bytes occupied by the descriptor including the header checksum byte.
    pub header_len: usize,
}

impl FrameDescriptor {
    pub fn summary(&self) -> String {
        format!(
            "v{} block={:?} linked={} content_checksum={} content_size={:?}",
            self.version, self.block_size, self.linked_blocks, self.content_checksum, self.content_size,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("frame truncated: have {have} bytes, need {need}")]
    Truncated { have: usize, need: usize },
    #[error("bad frame magic 0x{0:08x}")]
    BadMagic(u32),
    #[error("skippable frame 0x{0:08x} carries no data")]
    SkippableFrame(u32),
    #[error("legacy lz4 frames are not supported")]
    LegacyFrame,
    #[error("unsupported frame version {0}")]
    UnsupportedVersion(u8),
    #[error("reserved descriptor bits set")]
    ReservedBits,
    #[error("unknown block size id {0}")]
    UnknownBlockSize(u8),
}
