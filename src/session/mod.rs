//! Transcription session management
//!
//! This module provides the session engine:
//! - `SessionRegistry`: tracks session identity, ownership, activity
//!   state and chunk counters
//! - `SessionCoordinator`: orchestrates chunk processing, live fan-out
//!   through the broadcast hub, and final artifact persistence

mod coordinator;
mod registry;

pub use coordinator::{SessionCoordinator, SessionError, UNKNOWN_ARTIFACT_ID};
pub use registry::{Session, SessionRegistry};
