pub mod config;
pub mod engine;
pub mod http;
pub mod hub;
pub mod session;
pub mod store;

pub use config::Config;
pub use engine::{
    MockTranscriptionEngine, TranscriptionEngine, TranscriptionOutput, FAILED_CHUNK_TEXT,
};
pub use http::{create_router, AppState};
pub use hub::{BroadcastHub, ChunkEvent, SUBSCRIBER_BUFFER};
pub use session::{Session, SessionCoordinator, SessionError, SessionRegistry, UNKNOWN_ARTIFACT_ID};
pub use store::{Artifact, ArtifactStore, InMemoryArtifactStore};
