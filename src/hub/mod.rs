//! Per-session live broadcast
//!
//! This module provides the `BroadcastHub` that fans out transcription
//! chunk events to live viewers:
//! - One multicast channel per active session, created lazily
//! - Independent bounded queue per subscriber (no replay of history)
//! - Slow subscribers are disconnected rather than allowed to stall
//!   chunk ingestion

mod broadcast;
mod events;

pub use broadcast::{BroadcastHub, SUBSCRIBER_BUFFER};
pub use events::ChunkEvent;
