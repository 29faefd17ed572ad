//! compression/types.rs
//! Error taxonomy and the compressor/decompressor seams.

use thiserror::Error;

/// Every failure the compression layer can surface.
///
/// Errors are returned synchronously from the call that triggered them and are
/// never retried internally: the transforms are deterministic, so retrying the
/// same input cannot succeed.
#[derive(Debug, Error)]
pub enum CompressionError {
    /// Invalid level or malformed dictionary at construction time.
    #[error("invalid configuration: {reason}")]
    Configuration { reason: String },

    /// Malformed, truncated or dictionary-mismatched compressed input.
    #[error("decode failed: {reason}")]
    Decode { reason: String },

    /// The codec has no worst-case output bound for this input size.
    #[error("no compression bound for input of {input_len} bytes")]
    CompressionBound { input_len: usize },

    /// A streaming call was issued after the session was finished.
    #[error("session closed: cannot {operation} after finish")]
    SessionClosed { operation: &'static str },

    /// The codec rejected a compression call.
    #[error("compress failed: {reason}")]
    CompressFailed { reason: String },

    /// Reader or writer failure inside the stream helpers.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompressionError {
    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        CompressionError::Configuration { reason: reason.into() }
    }

    pub(crate) fn decode(reason: impl Into<String>) -> Self {
        CompressionError::Decode { reason: reason.into() }
    }

    pub fn is_session_closed(&self) -> bool {
        matches!(self, CompressionError::SessionClosed { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, CompressionError::Decode { .. })
    }
}

pub type Result<T> = std::result::Result<T, CompressionError>;

// Require Send so trait objects can cross thread boundaries.
pub trait Compressor: Send {
    /// Compress a single chunk, appending whatever the codec emits to `out`.
    fn compress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<()>;
    /// Emit a synchronization point without closing the frame.
    fn flush(&mut self, out: &mut Vec<u8>) -> Result<()>;
    /// Close the frame. Further calls fail with `SessionClosed`.
    fn finish(&mut self, out: &mut Vec<u8>) -> Result<()>;
}

pub trait Decompressor: Send {
    /// Decompress a single chunk, appending recovered plaintext to `out`.
    fn decompress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<()>;
    /// Verify the stream ended on a frame boundary.
    fn finish(&mut self) -> Result<()>;
}
