//! src/headers/decode.rs
//!
//! Frame descriptor decoding.
//!
//! Design notes:
//! - Reads only the descriptor; never touches block data.
//! - The header checksum byte is skipped here; the native decoder verifies it.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::constants::{
    FRAME_VERSION, HEADER_MIN_LEN, LZ4F_MAGIC, LZ4_LEGACY_MAGIC, SKIPPABLE_MAGIC_MAX, SKIPPABLE_MAGIC_MIN,
};
use crate::headers::types::{BlockSizeClass, FrameDescriptor, FrameFlags, HeaderError};

const BD_RESERVED: u8 = 0b1000_1111;

/// Parse the LZ4 frame descriptor at the start of `buf`.
///
/// # Layout
///
/// ```text
/// [ magic (4) ][ FLG (1) ][ BD (1) ][ content size (0|8) ][ dict id (0|4) ][ HC (1) ]
/// ```
///
/// # Errors
/// - `Truncated` if `buf` ends before the descriptor does.
/// - `BadMagic`, `SkippableFrame`, `LegacyFrame` for anything that is not a data frame.
/// - `UnsupportedVersion`, `ReservedBits`, `UnknownBlockSize` for malformed descriptors.
pub fn parse_frame_header(buf: &[u8]) -> Result<FrameDescriptor, HeaderError> {
    if buf.len() < HEADER_MIN_LEN {
        return Err(HeaderError::Truncated { have: buf.len(), need: HEADER_MIN_LEN });
    }

    let mut rd = Cursor::new(buf);
    let magic = read(rd.read_u32::<LittleEndian>(), buf.len(), 4)?;
    match magic {
        LZ4F_MAGIC => {}
        LZ4_LEGACY_MAGIC => return Err(HeaderError::LegacyFrame),
        m if (SKIPPABLE_MAGIC_MIN..=SKIPPABLE_MAGIC_MAX).contains(&m) => {
            return Err(HeaderError::SkippableFrame(m))
        }
        m => return Err(HeaderError::BadMagic(m)),
    }

    let flg = read(rd.read_u8(), buf.len(), 5)?;
    let bd = read(rd.read_u8(), buf.len(), 6)?;

    let version = flg >> 6;
    if version != FRAME_VERSION {
        return Err(HeaderError::UnsupportedVersion(version));
    }
    let flags = FrameFlags::from_bits_truncate(flg);
    if flags.contains(FrameFlags::RESERVED) || bd & BD_RESERVED != 0 {
        return Err(HeaderError::ReservedBits);
    }

    let size_id = (bd >> 4) & 0b0111;
    let block_size = BlockSizeClass::try_from(size_id).map_err(|_| HeaderError::UnknownBlockSize(size_id))?;

    let mut need = HEADER_MIN_LEN;
    let content_size = if flags.contains(FrameFlags::CONTENT_SIZE) {
        need += 8;
        Some(read(rd.read_u64::<LittleEndian>(), buf.len(), need)?)
    } else {
        None
    };
    let dict_id = if flags.contains(FrameFlags::DICT_ID) {
        need += 4;
        Some(read(rd.read_u32::<LittleEndian>(), buf.len(), need)?)
    } else {
        None
    };

    // Header checksum byte.
    if buf.len() < need {
        return Err(HeaderError::Truncated { have: buf.len(), need });
    }

    Ok(FrameDescriptor {
        version,
        block_size,
        linked_blocks: !flags.contains(FrameFlags::BLOCK_INDEPENDENT),
        block_checksum: flags.contains(FrameFlags::BLOCK_CHECKSUM),
        content_checksum: flags.contains(FrameFlags::CONTENT_CHECKSUM),
        content_size,
        dict_id,
        header_len: need,
    })
}

#[inline]
fn read<T>(res: std::io::Result<T>, have: usize, need: usize) -> Result<T, HeaderError> {
    res.map_err(|_| HeaderError::Truncated { have, need })
}
