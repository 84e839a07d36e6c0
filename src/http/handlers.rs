use super::state::AppState;
use crate::hub::ChunkEvent;
use crate::session::SessionError;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::sse::{Event, KeepAlive, Sse},
    response::{IntoResponse, Json},
};
use futures::stream::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, info};

/// Owner identity fallback when no identity header is present
const ANONYMOUS_OWNER: &str = "anonymous";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct ChunkAccepted {
    pub session_id: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct EndSessionParams {
    /// Optional explicit final text; overrides the accumulated chunks
    pub final_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EndSessionResponse {
    pub saved_id: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn owner_id(headers: &HeaderMap) -> String {
    headers
        .get("x-owner-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or(ANONYMOUS_OWNER)
        .to_string()
}

fn sse_from_events(
    rx: tokio::sync::mpsc::Receiver<ChunkEvent>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let stream = ReceiverStream::new(rx).map(|event| Event::default().json_data(&event));

    Sse::new(stream).keep_alive(KeepAlive::default())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/transcription/session
/// Start a new transcription session
pub async fn start_session(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let owner = owner_id(&headers);
    let session_id = state.coordinator.start(&owner).await;

    info!("Started session {} for owner {}", session_id, owner);

    (StatusCode::CREATED, Json(SessionResponse { session_id }))
}

/// POST /api/v1/transcription/session/:session_id/chunk
/// Submit one raw audio chunk for processing
pub async fn submit_chunk(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    body: Bytes,
) -> impl IntoResponse {
    if body.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No audio data provided".to_string(),
            }),
        )
            .into_response();
    }

    match state.coordinator.process_chunk(&session_id, &body).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ChunkAccepted {
                session_id,
                status: "processed".to_string(),
            }),
        )
            .into_response(),
        Err(SessionError::InvalidSession(id)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Session {} not found or already ended", id),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to process chunk for {}: {}", session_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to process chunk: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /api/v1/transcription/stream/:session_id
/// Live SSE stream of chunk events for a session
///
/// Subscribing to an unknown or ended session yields an empty stream
/// that completes immediately.
pub async fn stream_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    info!("New live viewer for session {}", session_id);

    let rx = state.coordinator.subscribe(&session_id).await;
    sse_from_events(rx)
}

/// DELETE /api/v1/transcription/session/:session_id
/// End a session and persist the final transcription
pub async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(params): Query<EndSessionParams>,
) -> impl IntoResponse {
    match state
        .coordinator
        .end(&session_id, params.final_text.as_deref())
        .await
    {
        Ok(saved_id) => (StatusCode::OK, Json(EndSessionResponse { saved_id })).into_response(),
        Err(SessionError::InvalidSession(id)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Session {} not found", id),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to end session {}: {}", session_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to end session: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /api/v1/transcription/session/:session_id
/// Current state of a session
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.coordinator.session(&session_id).await {
        Some(session) => (StatusCode::OK, Json(session)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Session {} not found", session_id),
            }),
        )
            .into_response(),
    }
}

/// GET /api/v1/transcription/history
/// All persisted artifacts for the requesting owner, newest first
pub async fn get_history(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let owner = owner_id(&headers);

    match state.coordinator.history(&owner).await {
        Ok(artifacts) => (StatusCode::OK, Json(artifacts)).into_response(),
        Err(e) => {
            error!("Failed to load history for {}: {}", owner, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to load history: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// POST /api/v1/transcribe
/// Single-shot transcription: one chunk in, live stream of the
/// throwaway session out
pub async fn transcribe(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    if body.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No audio data provided".to_string(),
            }),
        )
            .into_response();
    }

    let owner = owner_id(&headers);

    match state.coordinator.transcribe(&owner, &body).await {
        Ok((session_id, rx)) => {
            info!("Single-shot transcription on session {}", session_id);
            sse_from_events(rx).into_response()
        }
        Err(e) => {
            error!("Single-shot transcription failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Error processing audio: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
