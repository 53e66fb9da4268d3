//! compression/encoder.rs
//! Streaming LZ4 frame encoder over an in-memory buffer.

use crate::compression::native::{self, CompressionContext};
use crate::compression::types::{CodecError, Direction, FramePreferences, Stage};
use crate::constants::HEADER_MAX_LEN;
use crate::telemetry::CodecCounters;

/// Compress `input` into a single LZ4 frame.
///
/// The output starts sized for the header plus one chunk and grows only when
/// the native worst-case bound for the next call no longer fits.
pub fn encode_frame(
    input: &[u8],
    prefs: &FramePreferences,
    counters: &mut CodecCounters,
) -> Result<Vec<u8>, CodecError> {
    let declared = if prefs.declare_content_size { input.len() as u64 } else { 0 };
    let native_prefs = native::preferences(prefs, declared);
    let chunk_size = prefs.chunk_size.max(1);

    let mut ctx = CompressionContext::new()
        .map_err(|message| CodecError::Context { direction: Direction::Encode, message })?;

    let first = input.len().min(chunk_size);
    let mut out = vec![0u8; HEADER_MAX_LEN + native::compress_bound(first, &native_prefs)];

    let mut written = ctx
        .begin(&mut out, &native_prefs)
        .map_err(|m| CodecError::stream(Direction::Encode, Stage::Begin, m))?;

    for chunk in input.chunks(chunk_size) {
        reserve(&mut out, written, native::compress_bound(chunk.len(), &native_prefs), counters);
        written += ctx
            .update(&mut out[written..], chunk)
            .map_err(|m| CodecError::stream(Direction::Encode, Stage::Update, m))?;
    }

    reserve(&mut out, written, native::compress_bound(0, &native_prefs), counters);
    written += ctx
        .end(&mut out[written..])
        .map_err(|m| CodecError::stream(Direction::Encode, Stage::End, m))?;

    out.truncate(written);
    Ok(out)
}

/// Make sure `out[written..]` holds at least `need` bytes.
/// Grows to at least double so large inputs reallocate O(log n) times.
pub(crate) fn reserve(out: &mut Vec<u8>, written: usize, need: usize, counters: &mut CodecCounters) {
    if out.len() - written >= need {
        return;
    }
    let target = (written + need).max(out.len() * 2);
    out.resize(target, 0);
    counters.add_growth();
}
