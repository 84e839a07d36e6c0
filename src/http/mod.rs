//! HTTP API server exposing the session coordinator
//!
//! This module provides a thin REST/SSE surface over the coordinator:
//! - POST /api/v1/transcription/session - Start a new session
//! - POST /api/v1/transcription/session/:id/chunk - Submit a chunk
//! - GET /api/v1/transcription/stream/:id - Live SSE chunk stream
//! - DELETE /api/v1/transcription/session/:id - End a session
//! - GET /api/v1/transcription/session/:id - Session status
//! - GET /api/v1/transcription/history - Owner's artifacts
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
