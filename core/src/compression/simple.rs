//! compression/simple.rs
//!
//! One-shot compression and decompression of complete buffers.
//!
//! Design notes:
//! - The codec owns one compression and one decompression context, both loaded
//!   once with the configured level and dictionary and reused across calls.
//! - Compression output is sized from the codec bound for the input length.
//! - Decompression trusts the frame header for the output size when present and
//!   never returns partially decoded data.

use tracing::debug;

use crate::compression::codec::{DecoderContext, EncoderContext};
use crate::compression::config::{CodecConfig, Dictionary};
use crate::compression::types::Result;
use crate::telemetry::{SessionCounters, TelemetrySnapshot};

/// Compress/decompress whole buffers with a fixed level and dictionary.
pub struct SimpleCodec {
    config: CodecConfig,
    encoder: EncoderContext,
    decoder: DecoderContext,
    counters: SessionCounters,
}

impl SimpleCodec {
    /// Build a codec from `config`.
    ///
    /// # Errors
    /// - `CompressionError::Configuration` for an out-of-range level or a
    ///   dictionary the codec cannot load.
    pub fn new(config: CodecConfig) -> Result<Self> {
        let encoder = EncoderContext::create(&config)?;
        let decoder = DecoderContext::create(&config)?;
        debug!(
            level = config.resolved_level(),
            dict_len = config.dictionary().map_or(0, Dictionary::len),
            "simple codec ready"
        );
        Ok(Self { config, encoder, decoder, counters: SessionCounters::default() })
    }

    pub fn with_level(level: i32) -> Result<Self> {
        Self::new(CodecConfig::new().with_level(level))
    }

    pub fn with_dictionary(dictionary: impl Into<Dictionary>) -> Result<Self> {
        Self::new(CodecConfig::new().with_dictionary(dictionary))
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Compress `input` into one self-contained frame.
    ///
    /// # Errors
    /// - `CompressionError::CompressionBound` if no output bound exists for the input size.
    /// - `CompressionError::CompressFailed` if the codec rejects the call.
    pub fn compress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let out = self.encoder.compress_once(input)?;
        self.counters.add_feed(input.len(), out.len());
        Ok(out)
    }

    /// Decompress one complete frame produced with the same dictionary.
    ///
    /// # Errors
    /// - `CompressionError::Decode` for corrupt, truncated or mismatched input.
    pub fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        match self.decoder.decompress_once(input) {
            Ok(out) => {
                self.counters.add_decode(input.len(), out.len());
                Ok(out)
            }
            Err(err) => {
                debug!(input_len = input.len(), error = %err, "decompress failed");
                Err(err)
            }
        }
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters)
    }
}
