//! headers/mod.rs
//! LZ4 frame descriptor parsing.
//!
//! Notes:
//! - Decode uses the declared content size as a pre-sizing hint only.
//! - Frames without a declared size are valid; callers must not assume one.

pub mod types;
pub mod decode;

pub use types::*;
pub use decode::*;
