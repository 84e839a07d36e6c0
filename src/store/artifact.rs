use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted transcription record, partial or final
///
/// The record shape is stable across store implementations so that
/// swapping the backend is transparent to the coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    /// Storage-assigned id; None until saved
    pub id: Option<String>,

    /// Session the transcription belongs to
    pub session_id: String,

    /// Transcribed text
    pub text: String,

    /// Confidence score (0.0 to 1.0); final artifacts carry 1.0
    pub confidence: f64,

    /// When the artifact was produced
    pub timestamp: DateTime<Utc>,

    /// True for the authoritative final text of a session
    pub is_complete: bool,

    /// Owning user, if known
    pub owner_id: Option<String>,
}

/// Persistence capability consumed by the coordinator
#[async_trait::async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persist an artifact, returning its assigned id
    async fn save(&self, artifact: Artifact) -> Result<String>;

    /// Most recently saved artifact for a session, if any
    async fn find_latest_by_session(&self, session_id: &str) -> Result<Option<Artifact>>;

    /// All artifacts for an owner, newest first
    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Artifact>>;
}
