//! compression/mod.rs
//! Session and buffering layer over the Zstandard codec.
//!
//! - `SimpleCodec`: one-shot compress/decompress of complete buffers.
//! - `StreamingSession`: incremental compression, flush points, exactly-once finish.
//! - `StreamingDecompressor`: incremental decoding of a frame delivered in pieces.
//! - `codec`: the thin adapter over `zstd-safe` everything above is built on.

pub mod codec;
pub mod config;
pub mod constants;
pub mod decoder;
pub mod session;
pub mod simple;
pub mod stream;
pub mod types;

pub use codec::{frame_content_size, max_compressed_size, max_flush_size};
pub use config::{CodecConfig, CodecLevel, Dictionary};
pub use decoder::StreamingDecompressor;
pub use session::StreamingSession;
pub use simple::SimpleCodec;
pub use stream::{compress_reader, compress_stream, decompress_reader};
pub use types::*;
