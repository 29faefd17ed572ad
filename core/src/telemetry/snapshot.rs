//! telemetry/snapshot.rs
//!
//! Immutable view over `SessionCounters` with derived ratios.

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::SessionCounters;

/// Point-in-time telemetry for one codec or session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub calls_feed: u64,
    pub calls_flush: u64,
    pub calls_finish: u64,
    pub bytes_plaintext: u64,
    pub bytes_compressed: u64,
    /// `bytes_compressed / bytes_plaintext`, 0.0 when nothing was compressed.
    pub compression_ratio: f64,
    pub calls_decode: u64,
    pub bytes_decode_in: u64,
    pub bytes_decode_out: u64,
}

impl TelemetrySnapshot {
    pub fn from(counters: &SessionCounters) -> Self {
        let compression_ratio = if counters.bytes_plaintext > 0 {
            counters.bytes_compressed as f64 / counters.bytes_plaintext as f64
        } else {
            0.0
        };

        Self {
            calls_feed: counters.calls_feed,
            calls_flush: counters.calls_flush,
            calls_finish: counters.calls_finish,
            bytes_plaintext: counters.bytes_plaintext,
            bytes_compressed: counters.bytes_compressed,
            compression_ratio,
            calls_decode: counters.calls_decode,
            bytes_decode_in: counters.bytes_decode_in,
            bytes_decode_out: counters.bytes_decode_out,
        }
    }

    /// Bytes saved by compression; zero when the output grew.
    pub fn bytes_saved(&self) -> u64 {
        self.bytes_plaintext.saturating_sub(self.bytes_compressed)
    }
}
