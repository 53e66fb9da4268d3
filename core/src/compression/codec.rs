//! compression/codec.rs
//! `FrameCodec`: preferences bound to the encode/decode loops.
use std::time::Instant;

use crate::compression::decoder::decode_frame;
use crate::compression::encoder::encode_frame;
use crate::compression::types::{CodecError, Direction, FramePreferences};
use crate::headers::{parse_frame_header, FrameDescriptor};
use crate::telemetry::CodecCounters;

/// Stateless LZ4 frame codec. Cheap to clone; every call creates and frees
/// its own native context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameCodec {
    prefs: FramePreferences,
}

impl FrameCodec {
    pub fn new(prefs: FramePreferences) -> Self {
        Self { prefs }
    }

    pub fn preferences(&self) -> &FramePreferences {
        &self.prefs
    }

    pub fn encode(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        self.encode_tracked(input, &mut CodecCounters::default())
    }

    pub fn decode(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        self.decode_tracked(input, &mut CodecCounters::default())
    }

    pub fn encode_tracked(&self, input: &[u8], counters: &mut CodecCounters) -> Result<Vec<u8>, CodecError> {
        self.run_tracked(Direction::Encode, input, counters)
    }

    pub fn decode_tracked(&self, input: &[u8], counters: &mut CodecCounters) -> Result<Vec<u8>, CodecError> {
        self.run_tracked(Direction::Decode, input, counters)
    }

    pub fn run(&self, direction: Direction, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        self.run_tracked(direction, input, &mut CodecCounters::default())
    }

    /// Run one direction and record the call in `counters`.
    pub fn run_tracked(
        &self,
        direction: Direction,
        input: &[u8],
        counters: &mut CodecCounters,
    ) -> Result<Vec<u8>, CodecError> {
        let start = Instant::now();
        let result = match direction {
            Direction::Encode => encode_frame(input, &self.prefs, counters),
            Direction::Decode => decode_frame(input, counters),
        };
        match &result {
            Ok(out) => counters.add_call(direction, input.len(), out.len(), start.elapsed()),
            Err(_) => counters.add_failure(direction),
        }
        result
    }
}

/// Encode with default preferences.
pub fn encode(input: &[u8]) -> Result<Vec<u8>, CodecError> {
    FrameCodec::default().encode(input)
}

/// Decode any single LZ4 frame.
pub fn decode(input: &[u8]) -> Result<Vec<u8>, CodecError> {
    FrameCodec::default().decode(input)
}

/// Read a frame's descriptor without decompressing it.
pub fn inspect(frame: &[u8]) -> Result<FrameDescriptor, CodecError> {
    Ok(parse_frame_header(frame)?)
}
