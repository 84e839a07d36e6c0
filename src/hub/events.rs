use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One unit of live-streamed transcription output
///
/// Ephemeral: exists only as a message passing through the hub. A late
/// subscriber never sees events published before it attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkEvent {
    /// Session this event belongs to
    pub session_id: String,

    /// Transcribed text for the chunk
    pub text: String,

    /// Confidence score (0.0 to 1.0)
    pub confidence: f64,

    /// When the chunk was processed (not when it was submitted)
    pub timestamp: DateTime<Utc>,
}
