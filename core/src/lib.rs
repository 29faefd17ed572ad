//! zsession-core
//!
//! Session and buffering layer over the Zstandard codec: one-shot compression
//! with an optional level and shared dictionary, plus incremental streaming
//! sessions whose concatenated output is always one decodable frame.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod utils;

pub mod compression;
pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{
        CodecConfig, CodecLevel, CompressionError, Compressor, Decompressor, Dictionary,
        SimpleCodec, StreamingDecompressor, StreamingSession,
    };
    pub use crate::telemetry::{SessionCounters, TelemetrySnapshot};
}
