use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tracing::{info, warn};

use super::registry::{Session, SessionRegistry};
use crate::engine::{TranscriptionEngine, FAILED_CHUNK_TEXT};
use crate::hub::{BroadcastHub, ChunkEvent};
use crate::store::{Artifact, ArtifactStore};

/// Returned by `end` when a session produced no final text and nothing
/// was persisted.
pub const UNKNOWN_ARTIFACT_ID: &str = "unknown";

/// Failures surfaced by the coordinator
///
/// Engine failures are not represented here: they are recovered into a
/// degraded chunk event and never reach the submitter as an error.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The referenced session is unknown or already ended
    #[error("invalid session: {0}")]
    InvalidSession(String),

    /// The artifact store failed; the session is still considered ended
    #[error("artifact store failure")]
    Store(#[source] anyhow::Error),
}

/// Orchestrates the session lifecycle: Created -> Active -> Ended
///
/// Owns the registry, the broadcast hub, and the per-session text
/// accumulators. The transcription engine and artifact store are
/// injected capabilities.
pub struct SessionCoordinator {
    registry: SessionRegistry,
    hub: BroadcastHub,
    engine: Arc<dyn TranscriptionEngine>,
    store: Arc<dyn ArtifactStore>,

    /// session_id -> accumulated chunk texts, in processing order.
    /// The inner mutex serializes appends against session end, so a
    /// chunk racing `end` is discarded instead of folded into an
    /// already-fixed final text.
    accumulators: Mutex<HashMap<String, Arc<Mutex<Vec<String>>>>>,
}

impl SessionCoordinator {
    pub fn new(engine: Arc<dyn TranscriptionEngine>, store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            registry: SessionRegistry::new(),
            hub: BroadcastHub::new(),
            engine,
            store,
            accumulators: Mutex::new(HashMap::new()),
        }
    }

    /// Start a new session for an owner; returns its id in state Active
    pub async fn start(&self, owner_id: &str) -> String {
        let session_id = self.registry.create(owner_id).await;

        let mut accumulators = self.accumulators.lock().await;
        accumulators.insert(session_id.clone(), Arc::new(Mutex::new(Vec::new())));

        session_id
    }

    /// Process one raw chunk for an active session
    ///
    /// On success the transcribed text is appended to the session's
    /// accumulator, the chunk counter is incremented, and a chunk event
    /// is published to all live subscribers. Engine failures are
    /// converted into a degraded event (sentinel text, confidence 0.0);
    /// submission still succeeds.
    pub async fn process_chunk(&self, session_id: &str, chunk: &[u8]) -> Result<(), SessionError> {
        let session = self
            .registry
            .get(session_id)
            .await
            .filter(|s| s.is_active)
            .ok_or_else(|| SessionError::InvalidSession(session_id.to_string()))?;

        // Engine call happens without any shared lock held; it may be slow.
        let (text, confidence) = match self.engine.transcribe(chunk).await {
            Ok(output) => (output.text, output.confidence),
            Err(e) => {
                warn!(
                    "Transcription failed for session {}: {e:#}; emitting degraded chunk",
                    session_id
                );
                (FAILED_CHUNK_TEXT.to_string(), 0.0)
            }
        };

        let accumulator = {
            let accumulators = self.accumulators.lock().await;
            accumulators
                .get(session_id)
                .cloned()
                .ok_or_else(|| SessionError::InvalidSession(session_id.to_string()))?
        };

        let event = {
            let mut chunks = accumulator.lock().await;

            // `end` marks the session inactive while holding this lock,
            // so an append observed here cannot land after the final
            // text has been fixed.
            let still_active = self
                .registry
                .get(session_id)
                .await
                .is_some_and(|s| s.is_active);
            if !still_active {
                return Err(SessionError::InvalidSession(session_id.to_string()));
            }

            chunks.push(text.clone());
            self.registry.record_chunk(session_id).await;

            ChunkEvent {
                session_id: session_id.to_string(),
                text,
                confidence,
                timestamp: Utc::now(),
            }
        };

        self.hub.publish(session_id, event).await;

        info!(
            "Processed chunk {} for session {} (owner {})",
            session.chunk_count + 1,
            session_id,
            session.owner_id
        );

        Ok(())
    }

    /// Attach a live viewer to a session's chunk event stream
    ///
    /// An unknown or already-ended session yields an immediately-closed
    /// empty stream rather than an error: a viewer may legitimately
    /// race the end of a session.
    pub async fn subscribe(&self, session_id: &str) -> mpsc::Receiver<ChunkEvent> {
        let active = self
            .registry
            .get(session_id)
            .await
            .is_some_and(|s| s.is_active);

        if active {
            self.hub.subscribe(session_id).await
        } else {
            // Sender dropped right away: the receiver sees completion.
            let (_tx, rx) = mpsc::channel(1);
            rx
        }
    }

    /// End a session and persist its final transcription
    ///
    /// The final text is the explicit text if provided and non-empty,
    /// otherwise the space-joined accumulated chunks. Returns the
    /// persisted artifact id, or `UNKNOWN_ARTIFACT_ID` if there was no
    /// text to persist. The session is torn down (hub closed, registry
    /// entry removed) even when persistence fails.
    pub async fn end(
        &self,
        session_id: &str,
        final_text: Option<&str>,
    ) -> Result<String, SessionError> {
        let session = self
            .registry
            .get(session_id)
            .await
            .ok_or_else(|| SessionError::InvalidSession(session_id.to_string()))?;

        info!("Ending session {} (owner {})", session_id, session.owner_id);

        // Removing the accumulator is the exclusive gate for ending a
        // session: of two racing `end` calls, only the one that gets the
        // entry proceeds to persist; the other is told the session is
        // gone.
        let accumulator = {
            let mut accumulators = self.accumulators.lock().await;
            accumulators
                .remove(session_id)
                .ok_or_else(|| SessionError::InvalidSession(session_id.to_string()))?
        };

        // Fix the final text: mark the session ended while holding the
        // accumulator lock, then drain it. Chunks processed after this
        // point are rejected, not silently folded in.
        let chunks = {
            let mut chunks = accumulator.lock().await;
            self.registry.mark_ended(session_id).await;
            std::mem::take(&mut *chunks)
        };

        let final_text = match final_text {
            Some(text) if !text.trim().is_empty() => text.trim().to_string(),
            _ => {
                let joined: Vec<&str> = chunks.iter().map(|c| c.trim()).collect();
                joined.join(" ").trim().to_string()
            }
        };

        // Live viewers observe stream completion regardless of whether
        // anything gets persisted.
        self.hub.close(session_id).await;
        self.registry.remove(session_id).await;

        if final_text.is_empty() {
            info!(
                "Session {} ended with no transcribable text; nothing persisted",
                session_id
            );
            return Ok(UNKNOWN_ARTIFACT_ID.to_string());
        }

        let artifact = Artifact {
            id: None,
            session_id: session_id.to_string(),
            text: final_text,
            confidence: 1.0,
            timestamp: Utc::now(),
            is_complete: true,
            owner_id: Some(session.owner_id),
        };

        let saved_id = self
            .store
            .save(artifact)
            .await
            .map_err(SessionError::Store)?;

        info!("Session {} ended; saved final artifact {}", session_id, saved_id);
        Ok(saved_id)
    }

    /// Look up a session's current state
    pub async fn session(&self, session_id: &str) -> Option<Session> {
        self.registry.get(session_id).await
    }

    /// All artifacts persisted for an owner, newest first
    pub async fn history(&self, owner_id: &str) -> Result<Vec<Artifact>, SessionError> {
        self.store
            .find_by_owner(owner_id)
            .await
            .map_err(SessionError::Store)
    }

    /// Most recent artifact persisted for a session, if any
    pub async fn latest_artifact(
        &self,
        session_id: &str,
    ) -> Result<Option<Artifact>, SessionError> {
        self.store
            .find_latest_by_session(session_id)
            .await
            .map_err(SessionError::Store)
    }

    /// Single-shot convenience: start a throwaway session, process one
    /// chunk, and return the session's live stream
    pub async fn transcribe(
        &self,
        owner_id: &str,
        chunk: &[u8],
    ) -> Result<(String, mpsc::Receiver<ChunkEvent>), SessionError> {
        let session_id = self.start(owner_id).await;
        let rx = self.subscribe(&session_id).await;
        self.process_chunk(&session_id, chunk).await?;
        Ok((session_id, rx))
    }
}
