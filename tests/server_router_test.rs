// ABOUTME: Integration tests for the assembled application router
// ABOUTME: Covers health endpoints and the permissive CORS preflight
#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(missing_docs)]

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{create_test_resources, send_request, ScriptedLlmProvider};
use ritmo_server::server;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_and_ready_endpoints() {
    let resources = create_test_resources(ScriptedLlmProvider::replying("oi")).await;
    let router = server::router(resources);

    let (status, body) = send_request(router.clone(), Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());

    let (status, body) = send_request(router, Method::GET, "/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_cors_preflight_is_answered_permissively() {
    let resources = create_test_resources(ScriptedLlmProvider::replying("oi")).await;
    let router = server::router(resources);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/chat")
        .header("origin", "https://app.example.com")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "authorization, content-type")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert!(response.status().is_success());
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let resources = create_test_resources(ScriptedLlmProvider::replying("oi")).await;
    let router = server::router(resources);

    let (status, _) = send_request(router, Method::GET, "/api/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
