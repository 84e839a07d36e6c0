use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use tokio::sync::Mutex;

use super::artifact::{Artifact, ArtifactStore};

/// Pure in-memory artifact store
///
/// No external dependencies; used for tests and local development.
/// Ids are monotonically increasing, so insertion order doubles as
/// recency order.
pub struct InMemoryArtifactStore {
    storage: Mutex<HashMap<u64, Artifact>>,
    next_id: AtomicU64,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self {
            storage: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Total number of stored artifacts
    pub async fn len(&self) -> usize {
        self.storage.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn save(&self, artifact: Artifact) -> Result<String> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);

        let mut stored = artifact;
        stored.id = Some(id.to_string());

        let mut storage = self.storage.lock().await;
        storage.insert(id, stored);

        Ok(id.to_string())
    }

    async fn find_latest_by_session(&self, session_id: &str) -> Result<Option<Artifact>> {
        let storage = self.storage.lock().await;

        let latest = storage
            .iter()
            .filter(|(_, a)| a.session_id == session_id)
            .max_by_key(|&(id, _)| *id)
            .map(|(_, a)| a.clone());

        Ok(latest)
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Artifact>> {
        let storage = self.storage.lock().await;

        let mut matches: Vec<(u64, Artifact)> = storage
            .iter()
            .filter(|(_, a)| a.owner_id.as_deref() == Some(owner_id))
            .map(|(id, a)| (*id, a.clone()))
            .collect();

        // Newest first
        matches.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(matches.into_iter().map(|(_, a)| a).collect())
    }
}

impl Default for InMemoryArtifactStore {
    fn default() -> Self {
        Self::new()
    }
}
