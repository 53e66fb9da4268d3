//! compression/native.rs
//! Owned LZ4F contexts.
//!
//! Every native call in the crate goes through this file. Contexts free
//! themselves on drop, so early returns in the streaming loops cannot leak.
#![allow(unsafe_code)]

use std::ffi::CStr;
use std::ptr;

use lz4::liblz4::{
    BlockChecksum, BlockMode, BlockSize, ContentChecksum, FrameType, LZ4FCompressionContext,
    LZ4FDecompressionContext, LZ4FErrorCode, LZ4FFrameInfo, LZ4FPreferences, LZ4F_compressBegin,
    LZ4F_compressBound, LZ4F_compressEnd, LZ4F_compressUpdate, LZ4F_createCompressionContext,
    LZ4F_createDecompressionContext, LZ4F_decompress, LZ4F_freeCompressionContext,
    LZ4F_freeDecompressionContext, LZ4F_getErrorName, LZ4F_isError, LZ4F_VERSION,
};

use crate::compression::types::FramePreferences;
use crate::headers::BlockSizeClass;

/// Map an LZ4F return code to `Ok(value)` or the library's error name.
fn check(code: LZ4FErrorCode) -> Result<usize, String> {
    // SAFETY: both functions only inspect the integer code; the returned name
    // is a static NUL-terminated string owned by liblz4.
    unsafe {
        if LZ4F_isError(code) != 0 {
            let name = LZ4F_getErrorName(code);
            if name.is_null() {
                return Err(format!("lz4f error code {code}"));
            }
            return Err(CStr::from_ptr(name).to_string_lossy().into_owned());
        }
    }
    Ok(code as usize)
}

/// Build the native preference block. `content_size == 0` means "not declared".
pub(crate) fn preferences(prefs: &FramePreferences, content_size: u64) -> LZ4FPreferences {
    LZ4FPreferences {
        frame_info: LZ4FFrameInfo {
            block_size_id: match prefs.block_size {
                BlockSizeClass::Max64KB  => BlockSize::Max64KB,
                BlockSizeClass::Max256KB => BlockSize::Max256KB,
                BlockSizeClass::Max1MB   => BlockSize::Max1MB,
                BlockSizeClass::Max4MB   => BlockSize::Max4MB,
            },
            block_mode: if prefs.linked_blocks { BlockMode::Linked } else { BlockMode::Independent },
            content_checksum_flag: if prefs.content_checksum {
                ContentChecksum::ChecksumEnabled
            } else {
                ContentChecksum::NoChecksum
            },
            frame_type: FrameType::Frame,
            content_size,
            dict_id: 0,
            block_checksum_flag: if prefs.block_checksum {
                BlockChecksum::BlockChecksumEnabled
            } else {
                BlockChecksum::NoBlockChecksum
            },
        },
        compression_level: prefs.compression_level,
        auto_flush: 0,
        favor_dec_speed: 0,
        reserved: [0; 3],
    }
}

/// Worst-case output of one update call of `src_len` bytes, including any
/// data the context may still be buffering and the end mark.
pub(crate) fn compress_bound(src_len: usize, prefs: &LZ4FPreferences) -> usize {
    // SAFETY: pure function of its arguments; `prefs` outlives the call.
    unsafe { LZ4F_compressBound(src_len, prefs) }
}

pub(crate) struct CompressionContext {
    raw: LZ4FCompressionContext,
}

impl CompressionContext {
    pub(crate) fn new() -> Result<Self, String> {
        let mut raw = LZ4FCompressionContext(ptr::null_mut());
        // SAFETY: `raw` is a valid out-pointer for the duration of the call.
        let code = unsafe { LZ4F_createCompressionContext(&mut raw, LZ4F_VERSION) };
        match check(code) {
            Ok(_) => Ok(Self { raw }),
            Err(msg) => {
                if !raw.0.is_null() {
                    // SAFETY: non-null means liblz4 allocated it; freed exactly once here.
                    unsafe { LZ4F_freeCompressionContext(raw) };
                }
                Err(msg)
            }
        }
    }

    /// Write the frame header. Returns bytes written.
    pub(crate) fn begin(&mut self, dst: &mut [u8], prefs: &LZ4FPreferences) -> Result<usize, String> {
        // SAFETY: `dst` is valid for `dst.len()` writes; the context is live.
        check(unsafe { LZ4F_compressBegin(self.raw, dst.as_mut_ptr(), dst.len(), prefs) })
    }

    /// Compress `src`. `dst` must hold `compress_bound(src.len())` bytes.
    pub(crate) fn update(&mut self, dst: &mut [u8], src: &[u8]) -> Result<usize, String> {
        // SAFETY: both slices are valid for their lengths; null options = defaults.
        check(unsafe {
            LZ4F_compressUpdate(self.raw, dst.as_mut_ptr(), dst.len(), src.as_ptr(), src.len(), ptr::null())
        })
    }

    /// Flush buffered data, write the end mark and content checksum.
    pub(crate) fn end(&mut self, dst: &mut [u8]) -> Result<usize, String> {
        // SAFETY: `dst` is valid for `dst.len()` writes.
        check(unsafe { LZ4F_compressEnd(self.raw, dst.as_mut_ptr(), dst.len(), ptr::null()) })
    }
}

impl Drop for CompressionContext {
    fn drop(&mut self) {
        // SAFETY: `raw` came from a successful create and is freed exactly once.
        unsafe { LZ4F_freeCompressionContext(self.raw) };
    }
}

/// Result of one `LZ4F_decompress` call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DecompressStep {
    pub consumed: usize,
    pub produced: usize,
    /// Bytes the decoder still expects; 0 once the frame is complete.
    pub hint: usize,
}

pub(crate) struct DecompressionContext {
    raw: LZ4FDecompressionContext,
}

impl DecompressionContext {
    pub(crate) fn new() -> Result<Self, String> {
        let mut raw = LZ4FDecompressionContext(ptr::null_mut());
        // SAFETY: `raw` is a valid out-pointer for the duration of the call.
        let code = unsafe { LZ4F_createDecompressionContext(&mut raw, LZ4F_VERSION) };
        match check(code) {
            Ok(_) => Ok(Self { raw }),
            Err(msg) => {
                if !raw.0.is_null() {
                    // SAFETY: see CompressionContext::new.
                    unsafe { LZ4F_freeDecompressionContext(raw) };
                }
                Err(msg)
            }
        }
    }

    pub(crate) fn decompress(&mut self, dst: &mut [u8], src: &[u8]) -> Result<DecompressStep, String> {
        let mut produced = dst.len();
        let mut consumed = src.len();
        // SAFETY: slices are valid for the lengths passed in; liblz4 writes the
        // actual counts back through the two size pointers.
        let hint = check(unsafe {
            LZ4F_decompress(self.raw, dst.as_mut_ptr(), &mut produced, src.as_ptr(), &mut consumed, ptr::null())
        })?;
        Ok(DecompressStep { consumed, produced, hint })
    }
}

impl Drop for DecompressionContext {
    fn drop(&mut self) {
        // SAFETY: `raw` came from a successful create and is freed exactly once.
        unsafe { LZ4F_freeDecompressionContext(self.raw) };
    }
}
