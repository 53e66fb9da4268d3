/// LZ4 frame magic number (little-endian on the wire).
pub const LZ4F_MAGIC: u32 = 0x184D_2204;

/// Legacy LZ4 frame magic (pre-frame-format `lz4` CLI output).
pub const LZ4_LEGACY_MAGIC: u32 = 0x184C_2102;

/// Skippable frames use magics 0x184D2A50..=0x184D2A5F.
pub const SKIPPABLE_MAGIC_MIN: u32 = 0x184D_2A50;
pub const SKIPPABLE_MAGIC_MAX: u32 = 0x184D_2A5F;

/// Frame format version carried in FLG bits 7-6.
pub const FRAME_VERSION: u8 = 0b01;

/// magic (4) + FLG (1) + BD (1) + HC (1)
pub const HEADER_MIN_LEN: usize = 7;
/// HEADER_MIN_LEN + content size (8) + dictionary id (4)
pub const HEADER_MAX_LEN: usize = 19;

/// Defaults when the config leaves a field out.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024; // 64 KiB
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 9;
pub const DEFAULT_WORKER_PREFIX: &str = "lz4-worker";

/// LZ4F clamps anything above this to the HC maximum.
pub const MAX_COMPRESSION_LEVEL: u32 = 16;

/// Max chunk size sanity bound (32 MiB).
pub const MAX_CHUNK_SIZE: usize = 32 * 1024 * 1024;

/// Decode trusts a declared content size for pre-sizing up to this many bytes;
/// beyond that the output grows as data actually arrives.
pub const MAX_PRESIZE: usize = 256 * 1024 * 1024;

/// Starting output estimate for frames without a declared size.
pub const MIN_DECODE_CAPACITY: usize = 64 * 1024;
