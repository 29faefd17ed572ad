//! constants.rs
//! Chunking defaults used by the reader/writer stream helpers.

/// Defaults when Option<T> is None
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024; // 64 KiB

/// Chunk sizes the stream helpers snap to (in bytes).
pub const ALLOWED_CHUNK_SIZES: &[usize] = &[
    1024,        // 1 KiB
    4 * 1024,    // 4 KiB
    16 * 1024,   // 16 KiB
    64 * 1024,   // 64 KiB
    128 * 1024,  // 128 KiB
    256 * 1024,  // 256 KiB
    1024 * 1024, // 1 MiB
    4096 * 1024, // 4 MiB
];

/// Max chunk size sanity bound (32 MiB).
pub const MAX_CHUNK_SIZE: usize = 32 * 1024 * 1024;

/// How a requested chunk size that is not in `ALLOWED_CHUNK_SIZES` is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChunkPolicy {
    /// Use the requested size as-is (clamped to `1..=MAX_CHUNK_SIZE`).
    Exact,
    /// Snap to the next allowed size.
    #[default]
    RoundUp,
    /// Snap to the previous allowed size.
    RoundDown,
}
