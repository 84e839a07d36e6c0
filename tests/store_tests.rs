// Unit tests for the in-memory artifact store
//
// These tests verify the persistence contract the coordinator relies
// on: id assignment, latest-by-session lookup, and newest-first
// owner history.

use anyhow::Result;
use chrono::Utc;
use voxstream::{Artifact, ArtifactStore, InMemoryArtifactStore};

fn artifact(session_id: &str, text: &str, owner_id: Option<&str>) -> Artifact {
    Artifact {
        id: None,
        session_id: session_id.to_string(),
        text: text.to_string(),
        confidence: 1.0,
        timestamp: Utc::now(),
        is_complete: true,
        owner_id: owner_id.map(str::to_string),
    }
}

#[tokio::test]
async fn test_save_assigns_unique_ids() -> Result<()> {
    let store = InMemoryArtifactStore::new();

    let id_a = store.save(artifact("s1", "one", None)).await?;
    let id_b = store.save(artifact("s1", "two", None)).await?;

    assert_ne!(id_a, id_b);
    assert_eq!(store.len().await, 2);

    Ok(())
}

#[tokio::test]
async fn test_find_latest_by_session() -> Result<()> {
    let store = InMemoryArtifactStore::new();

    store.save(artifact("s1", "older", None)).await?;
    store.save(artifact("s1", "newer", None)).await?;
    store.save(artifact("s2", "other session", None)).await?;

    let latest = store
        .find_latest_by_session("s1")
        .await?
        .expect("artifact should exist");
    assert_eq!(latest.text, "newer");

    assert!(store.find_latest_by_session("s3").await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_find_by_owner_newest_first() -> Result<()> {
    let store = InMemoryArtifactStore::new();

    store.save(artifact("s1", "first", Some("u1"))).await?;
    store.save(artifact("s2", "second", Some("u1"))).await?;
    store.save(artifact("s3", "not mine", Some("u2"))).await?;
    store.save(artifact("s4", "no owner", None)).await?;

    let mine = store.find_by_owner("u1").await?;
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0].text, "second");
    assert_eq!(mine[1].text, "first");

    assert!(store.find_by_owner("u3").await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_saved_artifact_keeps_record_shape() -> Result<()> {
    let store = InMemoryArtifactStore::new();

    let saved_id = store.save(artifact("s1", "final text", Some("u1"))).await?;
    let found = store.find_latest_by_session("s1").await?.unwrap();

    assert_eq!(found.id.as_deref(), Some(saved_id.as_str()));
    assert_eq!(found.session_id, "s1");
    assert_eq!(found.text, "final text");
    assert_eq!(found.confidence, 1.0);
    assert!(found.is_complete);
    assert_eq!(found.owner_id.as_deref(), Some("u1"));

    Ok(())
}
