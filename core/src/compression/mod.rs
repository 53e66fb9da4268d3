//! compression/mod.rs
//! LZ4 frame encode/decode over in-memory buffers.
//!
//! Notes:
//! - Output is a standard LZ4 frame; any conforming decoder can read it.
//! - Encode is deterministic for a given input and preferences.
//! - Native contexts never outlive a single call.

pub mod types;
pub mod codec;
pub mod encoder;
pub mod decoder;
mod native;

pub use types::*;
pub use codec::*;
pub use decoder::presize_hint;
