use std::sync::Arc;

use crate::engine::{MockTranscriptionEngine, TranscriptionEngine};
use crate::session::SessionCoordinator;
use crate::store::{ArtifactStore, InMemoryArtifactStore};

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The session broadcast/persistence engine
    pub coordinator: Arc<SessionCoordinator>,
}

impl AppState {
    pub fn new(
        engine: Arc<dyn TranscriptionEngine>,
        store: Arc<dyn ArtifactStore>,
    ) -> Self {
        Self {
            coordinator: Arc::new(SessionCoordinator::new(engine, store)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            Arc::new(MockTranscriptionEngine),
            Arc::new(InMemoryArtifactStore::new()),
        )
    }
}
