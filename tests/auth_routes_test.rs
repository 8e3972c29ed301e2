// ABOUTME: Integration tests for the authentication route handlers
// ABOUTME: Covers registration, duplicate emails, login and credential checks
#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(missing_docs)]

mod common;

use axum::http::{Method, StatusCode};
use common::{create_test_resources, send_request, ScriptedLlmProvider};
use ritmo_server::routes::auth::AuthRoutes;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_register_creates_user_and_profile() {
    let resources = create_test_resources(ScriptedLlmProvider::replying("oi")).await;
    let router = AuthRoutes::routes(resources.clone());

    let (status, body) = send_request(
        router,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "email": "Maria@Example.com",
            "password": "super-secreta",
            "display_name": "Maria"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let user_id = Uuid::parse_str(body["user_id"].as_str().unwrap()).unwrap();

    // Email is normalized and the empty profile exists
    let user = resources
        .database
        .get_user_by_email("maria@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.id, user_id);
    assert!(user.is_active);

    let by_id = resources.database.get_user(user_id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "maria@example.com");
    assert_eq!(by_id.display_name.as_deref(), Some("Maria"));

    let profile = resources.database.get_profile(user_id).await.unwrap().unwrap();
    assert_eq!(profile.email.as_deref(), Some("maria@example.com"));
    assert!(profile.weight.is_none());
}

#[tokio::test]
async fn test_register_rejects_duplicates_and_weak_input() {
    let resources = create_test_resources(ScriptedLlmProvider::replying("oi")).await;
    let router = AuthRoutes::routes(resources.clone());

    let payload = json!({"email": "dup@example.com", "password": "super-secreta"});
    let (status, _) = send_request(
        router.clone(),
        Method::POST,
        "/api/auth/register",
        None,
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send_request(
        router.clone(),
        Method::POST,
        "/api/auth/register",
        None,
        Some(payload),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send_request(
        router.clone(),
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({"email": "not-an-email", "password": "super-secreta"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_request(
        router,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({"email": "short@example.com", "password": "curta"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_issues_token_for_valid_credentials() {
    let resources = create_test_resources(ScriptedLlmProvider::replying("oi")).await;
    let router = AuthRoutes::routes(resources.clone());

    send_request(
        router.clone(),
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({"email": "login@example.com", "password": "super-secreta"})),
    )
    .await;

    let (status, body) = send_request(
        router.clone(),
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "login@example.com", "password": "super-secreta"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let token = body["jwt_token"].as_str().unwrap();
    assert!(!token.is_empty());
    assert_eq!(body["user"]["email"], "login@example.com");

    // The issued token resolves back to the registered user
    let auth = resources
        .auth_manager
        .authenticate_header(Some(&format!("Bearer {token}")))
        .unwrap();
    assert_eq!(auth.email, "login@example.com");

    // Wrong password and unknown user both fail closed
    let (status, _) = send_request(
        router.clone(),
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "login@example.com", "password": "errada-errada"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send_request(
        router,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "ghost@example.com", "password": "super-secreta"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
