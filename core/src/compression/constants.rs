//! compression/constants.rs
//! Codec defaults and sizing limits.

/// Default compression level (balanced), matches zstd's own default.
pub const DEFAULT_LEVEL_ZSTD: i32 = zstd_safe::CLEVEL_DEFAULT;

/// Largest block the codec keeps buffered between calls (128 KiB).
/// After any streaming call returns, at most this many fed bytes are still unemitted.
pub const CODEC_BLOCK_SIZE: usize = 128 * 1024;

/// Frame header (18) + last block header (3) + content checksum (4).
pub const FRAME_EPILOGUE_MAX: usize = 18 + 3 + 4;

/// Inputs at or above this size have no valid compression bound.
#[cfg(target_pointer_width = "64")]
pub const MAX_INPUT_SIZE: usize = 0xFF00_FF00_FF00_FF00;
#[cfg(not(target_pointer_width = "64"))]
pub const MAX_INPUT_SIZE: usize = 0xFF00_FF00;

/// Raw-content dictionaries of 8 bytes or fewer are ignored by the codec.
pub const MIN_DICTIONARY_SIZE: usize = 9;

/// Magic prefix of a trained (zstd-format) dictionary.
pub const DICTIONARY_MAGIC: [u8; 4] = 0xEC30_A437u32.to_le_bytes();

/// Skippable frames use magic numbers 0x184D2A50..=0x184D2A5F.
pub const SKIPPABLE_MAGIC_BASE: u32 = 0x184D_2A50;
pub const SKIPPABLE_MAGIC_MASK: u32 = 0xFFFF_FFF0;
