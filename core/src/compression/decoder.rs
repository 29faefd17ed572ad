//! compression/decoder.rs
//! Incremental decompression of a frame delivered in arbitrary pieces.

use tracing::debug;

use crate::compression::codec::DecoderContext;
use crate::compression::config::CodecConfig;
use crate::compression::types::{CompressionError, Decompressor, Result};
use crate::telemetry::{SessionCounters, TelemetrySnapshot};

enum DecoderState {
    Open(DecoderContext),
    Finished,
}

/// Counterpart of `StreamingSession`: feed compressed bytes as they arrive and
/// receive every plaintext byte the codec can already recover, including data
/// made available by a flush before the frame is closed.
pub struct StreamingDecompressor {
    state: DecoderState,
    frame_complete: bool,
    counters: SessionCounters,
}

impl StreamingDecompressor {
    pub fn new(config: CodecConfig) -> Result<Self> {
        let ctx = DecoderContext::create(&config)?;
        Ok(Self {
            state: DecoderState::Open(ctx),
            frame_complete: false,
            counters: SessionCounters::default(),
        })
    }

    /// Decode `chunk` and return the plaintext recovered so far.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.decode_into(chunk, &mut out)?;
        Ok(out)
    }

    /// True once the last byte fed ended a frame (trailer and checksum verified).
    pub fn is_frame_complete(&self) -> bool {
        self.frame_complete
    }

    /// Close the decoder; fails if the input stopped mid-frame.
    pub fn finish(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, DecoderState::Finished) {
            DecoderState::Finished => Err(CompressionError::SessionClosed { operation: "finish" }),
            DecoderState::Open(_) if !self.frame_complete => {
                debug!(bytes_decode_in = self.counters.bytes_decode_in, "stream ended mid-frame");
                Err(CompressionError::decode("stream ended before the frame trailer"))
            }
            DecoderState::Open(_) => Ok(()),
        }
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters)
    }

    pub fn counters(&self) -> &SessionCounters {
        &self.counters
    }

    fn decode_into(&mut self, chunk: &[u8], out: &mut Vec<u8>) -> Result<()> {
        let DecoderState::Open(ctx) = &mut self.state else {
            return Err(CompressionError::SessionClosed { operation: "feed" });
        };
        if chunk.is_empty() {
            return Ok(());
        }
        if self.frame_complete {
            self.state = DecoderState::Finished;
            return Err(CompressionError::decode(format!(
                "{} bytes after the end of the frame",
                chunk.len()
            )));
        }
        let start = out.len();
        match ctx.feed(chunk, out) {
            Ok(hint) => {
                self.frame_complete = hint == 0;
                self.counters.add_decode(chunk.len(), out.len() - start);
                Ok(())
            }
            Err(err) => {
                out.truncate(start);
                self.state = DecoderState::Finished;
                Err(err)
            }
        }
    }
}

impl Decompressor for StreamingDecompressor {
    fn decompress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<()> {
        self.decode_into(input, out)
    }

    fn finish(&mut self) -> Result<()> {
        StreamingDecompressor::finish(self)
    }
}
