//! Durable persistence for finalized transcriptions
//!
//! The coordinator is backend-agnostic: it only sees the `ArtifactStore`
//! trait. The in-memory implementation backs the test suite and local
//! development; a durable backend can be swapped in without touching
//! the coordinator.

mod artifact;
mod memory;

pub use artifact::{Artifact, ArtifactStore};
pub use memory::InMemoryArtifactStore;
