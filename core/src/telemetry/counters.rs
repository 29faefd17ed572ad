//! telemetry/counters.rs
//! Mutable counters updated by codecs and sessions.
//!
//! Summary: Collects call counts and byte counts for compress/decompress work.
//! Converted into an immutable `TelemetrySnapshot` on demand.
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// Deterministic counters collected while compressing or decompressing.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCounters {
    pub calls_feed: u64,
    pub calls_flush: u64,
    pub calls_finish: u64,
    pub bytes_plaintext: u64,
    pub bytes_compressed: u64,

    // Decode direction, kept apart so ratios never mix the two.
    #[serde(default)]
    pub calls_decode: u64,
    #[serde(default)]
    pub bytes_decode_in: u64,
    #[serde(default)]
    pub bytes_decode_out: u64,
}

impl SessionCounters {
    /// Record one `feed`/`compress` call.
    ///
    /// - `pt_len`: plaintext bytes accepted
    /// - `comp_len`: compressed bytes emitted by this call
    pub fn add_feed(&mut self, pt_len: usize, comp_len: usize) {
        self.calls_feed += 1;
        self.bytes_plaintext += pt_len as u64;
        self.bytes_compressed += comp_len as u64;
    }

    /// Record one decode call.
    ///
    /// - `comp_len`: compressed bytes consumed
    /// - `pt_len`: plaintext bytes recovered
    pub fn add_decode(&mut self, comp_len: usize, pt_len: usize) {
        self.calls_decode += 1;
        self.bytes_decode_in += comp_len as u64;
        self.bytes_decode_out += pt_len as u64;
    }

    /// Record a synchronization point and the bytes it emitted.
    pub fn add_flush(&mut self, comp_len: usize) {
        self.calls_flush += 1;
        self.bytes_compressed += comp_len as u64;
    }

    /// Record the frame trailer.
    pub fn add_finish(&mut self, comp_len: usize) {
        self.calls_finish += 1;
        self.bytes_compressed += comp_len as u64;
    }

    // Merging per-session counters avoids sharing one set across threads.
    pub fn merge(&mut self, other: &SessionCounters) {
        self.calls_feed += other.calls_feed;
        self.calls_flush += other.calls_flush;
        self.calls_finish += other.calls_finish;

        self.bytes_plaintext += other.bytes_plaintext;
        self.bytes_compressed += other.bytes_compressed;

        self.calls_decode += other.calls_decode;
        self.bytes_decode_in += other.bytes_decode_in;
        self.bytes_decode_out += other.bytes_decode_out;
    }
}

impl AddAssign for SessionCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
