//! telemetry/mod.rs
//! Per-codec counters and immutable snapshots.
//!
//! Counters are owned by the codec or session that updates them, so no locks or
//! atomics are involved. Snapshots are plain values that serialize with serde.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
