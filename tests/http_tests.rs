// Tests for the HTTP transport layer
//
// These tests drive the axum router directly with tower's oneshot,
// no listening socket needed.

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use voxstream::{create_router, AppState};

fn router() -> Router {
    create_router(AppState::default())
}

async fn json_body(response: axum::response::Response) -> Result<Value> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

async fn start_session(router: &Router, owner: &str) -> Result<String> {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/transcription/session")
                .header("x-owner-id", owner)
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await?;
    Ok(body["session_id"].as_str().unwrap().to_string())
}

#[tokio::test]
async fn test_health_check() -> Result<()> {
    let response = router()
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_full_session_flow() -> Result<()> {
    let router = router();

    let session_id = start_session(&router, "u1").await?;
    assert!(session_id.starts_with("session-"));

    // Submit two chunks
    for chunk in ["Hello", "World"] {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!(
                        "/api/v1/transcription/session/{}/chunk",
                        session_id
                    ))
                    .body(Body::from(chunk))?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Session status reflects both chunks
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/transcription/session/{}", session_id))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let session = json_body(response).await?;
    assert_eq!(session["chunk_count"], 2);
    assert_eq!(session["is_active"], true);

    // End the session
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/transcription/session/{}", session_id))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await?;
    assert_ne!(body["saved_id"], "unknown");

    // History for the owner contains the final artifact
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/transcription/history")
                .header("x-owner-id", "u1")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let history = json_body(response).await?;
    let artifacts = history.as_array().unwrap();
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0]["text"], "Hello World");
    assert_eq!(artifacts[0]["is_complete"], true);

    Ok(())
}

#[tokio::test]
async fn test_chunk_for_unknown_session_returns_404() -> Result<()> {
    let response = router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/transcription/session/session-nope/chunk")
                .body(Body::from("lost"))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_empty_chunk_returns_400() -> Result<()> {
    let router = router();
    let session_id = start_session(&router, "u1").await?;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!(
                    "/api/v1/transcription/session/{}/chunk",
                    session_id
                ))
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_end_unknown_session_returns_404() -> Result<()> {
    let response = router()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/transcription/session/session-nope")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_end_with_explicit_final_text() -> Result<()> {
    let router = router();
    let session_id = start_session(&router, "u1").await?;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!(
                    "/api/v1/transcription/session/{}?final_text=dictated%20not%20read",
                    session_id
                ))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/transcription/history")
                .header("x-owner-id", "u1")
                .body(Body::empty())?,
        )
        .await?;
    let history = json_body(response).await?;
    assert_eq!(history[0]["text"], "dictated not read");

    Ok(())
}

#[tokio::test]
async fn test_single_shot_transcribe_requires_body() -> Result<()> {
    let response = router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/transcribe")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
