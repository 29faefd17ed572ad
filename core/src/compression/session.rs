//! compression/session.rs
//!
//! Incremental compression across arbitrarily many caller-sized chunks.
//!
//! Design notes:
//! - The encoder context lives inside `SessionState::Open`; finishing the session
//!   or dropping it releases the context, and nothing can reach it afterwards.
//! - `pending` tracks how many fed bytes the codec may still hold unemitted so
//!   that each call reserves its worst-case output up front.
//! - A codec failure mid-frame closes the session: the partial frame cannot be
//!   resumed.

use tracing::{debug, trace};

use crate::compression::codec::{max_flush_size, EncoderContext};
use crate::compression::config::{CodecConfig, Dictionary};
use crate::compression::constants::CODEC_BLOCK_SIZE;
use crate::compression::types::{CompressionError, Compressor, Result};
use crate::telemetry::{SessionCounters, TelemetrySnapshot};

enum SessionState {
    Open(EncoderContext),
    Finished,
}

/// Stateful streaming compressor: feed any number of times, flush zero or more
/// times, finish exactly once.
///
/// The concatenation of every byte returned by `feed`, `flush` and `finish`, in
/// call order, is one complete frame.
pub struct StreamingSession {
    config: CodecConfig,
    state: SessionState,
    pending: usize,
    counters: SessionCounters,
}

impl StreamingSession {
    /// Open a session.
    ///
    /// # Errors
    /// - `CompressionError::Configuration` for an out-of-range level or a
    ///   dictionary the codec cannot load.
    pub fn new(config: CodecConfig) -> Result<Self> {
        let ctx = EncoderContext::create(&config)?;
        debug!(
            level = config.resolved_level(),
            dict_len = config.dictionary().map_or(0, Dictionary::len),
            "streaming session opened"
        );
        Ok(Self {
            config,
            state: SessionState::Open(ctx),
            pending: 0,
            counters: SessionCounters::default(),
        })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, SessionState::Finished)
    }

    /// Feed `chunk` and return whatever the codec emits right away (possibly nothing).
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.feed_into(chunk, &mut out)?;
        Ok(out)
    }

    /// Force a synchronization point: everything fed so far becomes decodable.
    /// Returns an empty buffer when nothing new is pending.
    pub fn flush(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.flush_into(&mut out)?;
        Ok(out)
    }

    /// Close the frame and release the encoder context.
    pub fn finish(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.finish_into(&mut out)?;
        Ok(out)
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.counters)
    }

    pub fn counters(&self) -> &SessionCounters {
        &self.counters
    }

    fn feed_into(&mut self, chunk: &[u8], out: &mut Vec<u8>) -> Result<()> {
        self.ensure_open("feed")?;
        if chunk.is_empty() {
            self.counters.add_feed(0, 0);
            return Ok(());
        }
        let reserve = max_flush_size(self.pending.saturating_add(chunk.len()))?;
        let emitted = self.drive("feed", out, |ctx, out| ctx.feed(chunk, out, reserve))?;
        self.pending = self.pending.saturating_add(chunk.len()).min(CODEC_BLOCK_SIZE);
        self.counters.add_feed(chunk.len(), emitted);
        Ok(())
    }

    fn flush_into(&mut self, out: &mut Vec<u8>) -> Result<()> {
        self.ensure_open("flush")?;
        let reserve = max_flush_size(self.pending)?;
        let emitted = self.drive("flush", out, |ctx, out| ctx.flush(out, reserve))?;
        self.pending = 0;
        self.counters.add_flush(emitted);
        trace!(emitted, "session flushed");
        Ok(())
    }

    fn finish_into(&mut self, out: &mut Vec<u8>) -> Result<()> {
        self.ensure_open("finish")?;
        let reserve = max_flush_size(self.pending)?;
        let emitted = self.drive("finish", out, |ctx, out| ctx.finish(out, reserve))?;
        self.state = SessionState::Finished;
        self.pending = 0;
        self.counters.add_finish(emitted);
        debug!(
            bytes_plaintext = self.counters.bytes_plaintext,
            bytes_compressed = self.counters.bytes_compressed,
            "streaming session finished"
        );
        Ok(())
    }

    fn ensure_open(&self, operation: &'static str) -> Result<()> {
        match self.state {
            SessionState::Open(_) => Ok(()),
            SessionState::Finished => Err(CompressionError::SessionClosed { operation }),
        }
    }

    /// Run one codec step against the open context, returning how many bytes it
    /// appended to `out`. On failure the appended bytes are discarded and the
    /// session is closed.
    fn drive<F>(&mut self, operation: &'static str, out: &mut Vec<u8>, step: F) -> Result<usize>
    where
        F: FnOnce(&mut EncoderContext, &mut Vec<u8>) -> Result<()>,
    {
        let SessionState::Open(ctx) = &mut self.state else {
            return Err(CompressionError::SessionClosed { operation });
        };
        let start = out.len();
        match step(ctx, out) {
            Ok(()) => Ok(out.len() - start),
            Err(err) => {
                out.truncate(start);
                debug!(operation, error = %err, "codec failure, closing session");
                self.state = SessionState::Finished;
                Err(err)
            }
        }
    }
}

impl Drop for StreamingSession {
    fn drop(&mut self) {
        if let SessionState::Open(_) = self.state {
            debug!(
                bytes_plaintext = self.counters.bytes_plaintext,
                "streaming session dropped before finish; emitted stream is incomplete"
            );
        }
    }
}

impl Compressor for StreamingSession {
    fn compress_chunk(&mut self, input: &[u8], out: &mut Vec<u8>) -> Result<()> {
        self.feed_into(input, out)
    }

    fn flush(&mut self, out: &mut Vec<u8>) -> Result<()> {
        self.flush_into(out)
    }

    fn finish(&mut self, out: &mut Vec<u8>) -> Result<()> {
        self.finish_into(out)
    }
}
