//! compression/decoder.rs
//! Streaming LZ4 frame decoder over an in-memory buffer.

use crate::compression::encoder::reserve;
use crate::compression::native::DecompressionContext;
use crate::compression::types::{CodecError, Direction, Stage};
use crate::constants::{MAX_PRESIZE, MIN_DECODE_CAPACITY};
use crate::headers::{parse_frame_header, FrameDescriptor};
use crate::telemetry::CodecCounters;

/// Output bytes to allocate before streaming.
///
/// A declared content size is trusted up to `MAX_PRESIZE`. Without one the
/// decoder starts from an estimate and grows as blocks arrive.
pub fn presize_hint(descriptor: &FrameDescriptor, frame_len: usize) -> usize {
    match descriptor.content_size {
        Some(n) => usize::try_from(n).unwrap_or(usize::MAX).min(MAX_PRESIZE),
        None => frame_len.saturating_mul(4).clamp(MIN_DECODE_CAPACITY, MAX_PRESIZE),
    }
}

/// Decompress the first LZ4 frame in `input`.
///
/// # Errors
/// - `Stream { stage: Header }` if the descriptor is malformed.
/// - `Context` if the native decoder cannot be created.
/// - `Stream { stage: Update }` on corrupt blocks, checksum mismatch or truncation.
pub fn decode_frame(input: &[u8], counters: &mut CodecCounters) -> Result<Vec<u8>, CodecError> {
    let descriptor = parse_frame_header(input)?;
    let block_len = descriptor.block_size.max_block_len();

    let mut ctx = DecompressionContext::new()
        .map_err(|message| CodecError::Context { direction: Direction::Decode, message })?;

    let mut out = vec![0u8; presize_hint(&descriptor, input.len())];
    let (mut read, mut written) = (0usize, 0usize);

    loop {
        let step = ctx
            .decompress(&mut out[written..], &input[read..])
            .map_err(|m| CodecError::stream(Direction::Decode, Stage::Update, m))?;
        read += step.consumed;
        written += step.produced;

        if step.hint == 0 {
            break;
        }
        if written == out.len() {
            reserve(&mut out, written, block_len, counters);
            continue;
        }
        if read == input.len() {
            return Err(CodecError::stream(
                Direction::Decode,
                Stage::Update,
                format!("frame truncated: decoder expects {} more bytes", step.hint),
            ));
        }
        if step.consumed == 0 && step.produced == 0 {
            return Err(CodecError::stream(Direction::Decode, Stage::Update, "decoder made no progress"));
        }
    }

    if read < input.len() {
        log::debug!("decode: ignoring {} bytes after end of frame", input.len() - read);
    }

    out.truncate(written);
    Ok(out)
}
