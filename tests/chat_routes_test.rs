// ABOUTME: Integration tests for the chat proxy route handlers
// ABOUTME: Covers the two-row turn invariant, fallback masking and authorization
#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(missing_docs)]

mod common;

use axum::http::{Method, StatusCode};
use common::{create_test_resources, create_test_user, send_request, ScriptedLlmProvider};
use ritmo_server::routes::chat::ChatRoutes;
use serde_json::json;

// ============================================================================
// Successful turns
// ============================================================================

#[tokio::test]
async fn test_successful_turn_writes_user_row_then_ai_row() {
    let resources = create_test_resources(ScriptedLlmProvider::replying("Beba água! 💧")).await;
    let (user, auth) = create_test_user(&resources).await;
    let router = ChatRoutes::routes(resources.clone());

    let (status, body) = send_request(
        router,
        Method::POST,
        "/api/chat",
        Some(&auth),
        Some(json!({"message": "Quanto devo beber de água por dia?"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Beba água! 💧");

    // Exactly two new rows, in order: user then ai
    let messages = resources
        .database
        .list_chat_messages(user.id)
        .await
        .unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].message_type.as_str(), "user");
    assert_eq!(
        messages[0].content,
        "Quanto devo beber de água por dia?"
    );
    assert_eq!(messages[1].message_type.as_str(), "ai");
    assert_eq!(messages[1].content, "Beba água! 💧");
    assert!(messages[0].created_at <= messages[1].created_at);
}

#[tokio::test]
async fn test_image_url_is_stored_on_the_user_row() {
    let resources = create_test_resources(ScriptedLlmProvider::replying("Prato colorido! 🍎")).await;
    let (user, auth) = create_test_user(&resources).await;
    let router = ChatRoutes::routes(resources.clone());

    // The scripted provider has no vision capability, so the image is not
    // fetched; the reference is still recorded with the user's message
    let (status, _) = send_request(
        router,
        Method::POST,
        "/api/chat",
        Some(&auth),
        Some(json!({
            "message": "O que tem no meu prato?",
            "imageUrl": "https://example.com/prato.jpg"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);

    let messages = resources
        .database
        .list_chat_messages(user.id)
        .await
        .unwrap();
    assert_eq!(
        messages[0].image_urls,
        Some(vec!["https://example.com/prato.jpg".to_owned()])
    );
    assert_eq!(messages[1].image_urls, None);
}

// ============================================================================
// Upstream failure masking
// ============================================================================

#[tokio::test]
async fn test_upstream_failure_still_returns_200_with_fallback() {
    let resources = create_test_resources(ScriptedLlmProvider::failing()).await;
    let (user, auth) = create_test_user(&resources).await;
    let router = ChatRoutes::routes(resources.clone());

    let (status, body) = send_request(
        router,
        Method::POST,
        "/api/chat",
        Some(&auth),
        Some(json!({"message": "Oi Mari!"})),
    )
    .await;

    // The turn is treated as successful and the reply is a non-empty apology
    assert_eq!(status, StatusCode::OK);
    let reply = body["response"].as_str().unwrap();
    assert!(!reply.is_empty());

    // The ai row is never omitted: one ai row per user row holds on failure
    let messages = resources
        .database
        .list_chat_messages(user.id)
        .await
        .unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].message_type.as_str(), "ai");
    assert_eq!(messages[1].content, reply);
}

#[tokio::test]
async fn test_empty_upstream_reply_is_replaced_by_fallback() {
    let resources = create_test_resources(ScriptedLlmProvider::empty()).await;
    let (_, auth) = create_test_user(&resources).await;
    let router = ChatRoutes::routes(resources.clone());

    let (status, body) = send_request(
        router,
        Method::POST,
        "/api/chat",
        Some(&auth),
        Some(json!({"message": "Oi!"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["response"].as_str().unwrap().is_empty());
}

// ============================================================================
// Authorization
// ============================================================================

#[tokio::test]
async fn test_unauthenticated_call_writes_no_rows() {
    let resources = create_test_resources(ScriptedLlmProvider::replying("nunca")).await;
    let (user, _) = create_test_user(&resources).await;
    let router = ChatRoutes::routes(resources.clone());

    let (status, body) = send_request(
        router.clone(),
        Method::POST,
        "/api/chat",
        None,
        Some(json!({"message": "sem credencial"})),
    )
    .await;

    assert!(!status.is_success());
    assert!(body["error"]["code"].is_string());

    // A garbage token is rejected the same way
    let (status, _) = send_request(
        router,
        Method::POST,
        "/api/chat",
        Some("Bearer not-a-jwt"),
        Some(json!({"message": "sem credencial"})),
    )
    .await;
    assert!(!status.is_success());

    let count = resources
        .database
        .count_chat_messages(user.id)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_blank_message_is_rejected_without_writes() {
    let resources = create_test_resources(ScriptedLlmProvider::replying("oi")).await;
    let (user, auth) = create_test_user(&resources).await;
    let router = ChatRoutes::routes(resources.clone());

    let (status, _) = send_request(
        router,
        Method::POST,
        "/api/chat",
        Some(&auth),
        Some(json!({"message": "   "})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let count = resources
        .database
        .count_chat_messages(user.id)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

// ============================================================================
// History
// ============================================================================

#[tokio::test]
async fn test_history_is_chronological_and_per_user() {
    let resources = create_test_resources(ScriptedLlmProvider::replying("certo!")).await;
    let (_, auth_a) = create_test_user(&resources).await;
    let (user_b, auth_b) = create_test_user(&resources).await;
    let router = ChatRoutes::routes(resources.clone());

    for message in ["primeira", "segunda"] {
        let (status, _) = send_request(
            router.clone(),
            Method::POST,
            "/api/chat",
            Some(&auth_a),
            Some(json!({"message": message})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    // User B sees an empty history
    let (status, body) = send_request(
        router.clone(),
        Method::GET,
        "/api/chat/messages",
        Some(&auth_b),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["messages"].as_array().unwrap().len(), 0);
    assert_eq!(
        resources
            .database
            .count_chat_messages(user_b.id)
            .await
            .unwrap(),
        0
    );

    // User A sees four rows in display order: user/ai/user/ai
    let (status, body) = send_request(
        router,
        Method::GET,
        "/api/chat/messages",
        Some(&auth_a),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0]["message_type"], "user");
    assert_eq!(messages[0]["content"], "primeira");
    assert_eq!(messages[1]["message_type"], "ai");
    assert_eq!(messages[2]["message_type"], "user");
    assert_eq!(messages[2]["content"], "segunda");
    assert_eq!(messages[3]["message_type"], "ai");
}
