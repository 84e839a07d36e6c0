use std::collections::HashMap;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::events::ChunkEvent;

/// Bounded queue depth per subscriber. A subscriber that falls this far
/// behind is disconnected on the next publish.
pub const SUBSCRIBER_BUFFER: usize = 10;

/// Fan-out hub: session_id -> the set of live subscriber queues
///
/// Each subscriber gets its own bounded mpsc queue, so one session's
/// traffic never affects another session's ordering or backpressure,
/// and a slow viewer only ever loses its own subscription. Publishing
/// never blocks: a full or abandoned queue means that subscriber is
/// dropped from the session's fan-out set.
pub struct BroadcastHub {
    sessions: Mutex<HashMap<String, Vec<mpsc::Sender<ChunkEvent>>>>,
}

impl BroadcastHub {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Attach a new subscriber to a session's stream
    ///
    /// Each call yields an independent subscription that receives every
    /// event published after this point. No history is replayed.
    pub async fn subscribe(&self, session_id: &str) -> mpsc::Receiver<ChunkEvent> {
        let (tx, rx) = mpsc::channel(SUBSCRIBER_BUFFER);

        let mut sessions = self.sessions.lock().await;
        sessions
            .entry(session_id.to_string())
            .or_default()
            .push(tx);

        debug!("New subscriber for session {}", session_id);
        rx
    }

    /// Deliver an event to every current subscriber of the session
    ///
    /// Dropped if no subscribers are attached. Subscribers whose queue
    /// is full, or whose receiver side is gone, are removed from the
    /// fan-out set instead of being waited on.
    pub async fn publish(&self, session_id: &str, event: ChunkEvent) {
        let mut sessions = self.sessions.lock().await;

        let Some(subscribers) = sessions.get_mut(session_id) else {
            return;
        };

        subscribers.retain(|tx| match tx.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!(
                    "Dropping slow subscriber on session {} (buffer full)",
                    session_id
                );
                false
            }
            Err(TrySendError::Closed(_)) => false,
        });

        if subscribers.is_empty() {
            sessions.remove(session_id);
        }
    }

    /// Terminate all subscriptions for a session and release the channel
    ///
    /// Subscribers observe clean stream completion, not an error.
    pub async fn close(&self, session_id: &str) {
        let mut sessions = self.sessions.lock().await;
        if sessions.remove(session_id).is_some() {
            debug!("Closed broadcast channel for session {}", session_id);
        }
    }

    /// Number of live subscribers for a session
    pub async fn subscriber_count(&self, session_id: &str) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.get(session_id).map_or(0, |subs| subs.len())
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new()
    }
}
