use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Single-shot transcription
        .route("/api/v1/transcribe", post(handlers::transcribe))
        // Session lifecycle
        .route(
            "/api/v1/transcription/session",
            post(handlers::start_session),
        )
        .route(
            "/api/v1/transcription/session/:session_id/chunk",
            post(handlers::submit_chunk),
        )
        .route(
            "/api/v1/transcription/session/:session_id",
            get(handlers::get_session).delete(handlers::end_session),
        )
        // Live viewing
        .route(
            "/api/v1/transcription/stream/:session_id",
            get(handlers::stream_session),
        )
        // History
        .route(
            "/api/v1/transcription/history",
            get(handlers::get_history),
        )
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
