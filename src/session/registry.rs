use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

/// One continuous recording/transcription interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (e.g. "session-<uuid>")
    pub session_id: String,

    /// Identity of the initiating user ("anonymous" allowed)
    pub owner_id: String,

    /// True from creation until the session is ended
    pub is_active: bool,

    /// When the session started
    pub started_at: DateTime<Utc>,

    /// When the session ended, if it has
    pub ended_at: Option<DateTime<Utc>>,

    /// Number of chunks successfully processed
    pub chunk_count: u64,
}

/// In-memory session tracking, keyed by session id
///
/// No I/O; safe for concurrent access from many request tasks.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Allocate a fresh session in state Active
    pub async fn create(&self, owner_id: &str) -> String {
        let session_id = format!("session-{}", uuid::Uuid::new_v4());

        let session = Session {
            session_id: session_id.clone(),
            owner_id: owner_id.to_string(),
            is_active: true,
            started_at: Utc::now(),
            ended_at: None,
            chunk_count: 0,
        };

        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id.clone(), session);

        info!("Created session {} for owner {}", session_id, owner_id);
        session_id
    }

    pub async fn get(&self, session_id: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned()
    }

    /// Increment the chunk counter; false if the session is unknown
    pub async fn record_chunk(&self, session_id: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(session_id) {
            Some(session) => {
                session.chunk_count += 1;
                true
            }
            None => false,
        }
    }

    /// Mark a session ended; idempotent, a second call keeps the
    /// original end time. False if the session is unknown.
    pub async fn mark_ended(&self, session_id: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(session_id) {
            Some(session) => {
                if session.is_active {
                    session.is_active = false;
                    session.ended_at = Some(Utc::now());
                }
                true
            }
            None => false,
        }
    }

    /// Drop the session entry entirely (teardown)
    pub async fn remove(&self, session_id: &str) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id)
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
