// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database, auth, scripted LLM and request helpers
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

//! Shared test utilities for `ritmo_server`
//!
//! Common setup functions to reduce duplication across integration tests.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use ritmo_server::{
    auth::{generate_jwt_secret, hash_password, AuthManager},
    config::{AiConfig, AuthConfig, DatabaseUrl, Environment, LogLevel, ServerConfig},
    database::Database,
    errors::AppError,
    llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider},
    models::User,
    server::ServerResources,
};
use std::sync::{Arc, Once};
use tower::ServiceExt;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .init();
    });
}

/// Standard in-memory test database
pub async fn create_test_database() -> Arc<Database> {
    init_test_logging();
    Arc::new(Database::new("sqlite::memory:").await.unwrap())
}

/// Create a test authentication manager
pub fn create_test_auth_manager() -> Arc<AuthManager> {
    Arc::new(AuthManager::new(generate_jwt_secret().to_vec(), 24))
}

/// Scripted LLM provider: replies with a fixed string or fails on demand
pub struct ScriptedLlmProvider {
    behavior: ScriptedBehavior,
}

/// What the scripted provider does on `complete`
pub enum ScriptedBehavior {
    /// Return the given reply text
    Reply(String),
    /// Fail as if the upstream service errored
    Fail,
    /// Return an empty reply body
    EmptyReply,
}

impl ScriptedLlmProvider {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            behavior: ScriptedBehavior::Reply(text.into()),
        }
    }

    pub fn failing() -> Self {
        Self {
            behavior: ScriptedBehavior::Fail,
        }
    }

    pub fn empty() -> Self {
        Self {
            behavior: ScriptedBehavior::EmptyReply,
        }
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlmProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted Test Provider"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::text_only()
    }

    fn default_model(&self) -> &str {
        "scripted-1"
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        match &self.behavior {
            ScriptedBehavior::Reply(text) => Ok(ChatResponse {
                content: text.clone(),
                model: "scripted-1".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
            ScriptedBehavior::Fail => Err(AppError::external_service(
                "scripted",
                "simulated upstream failure",
            )),
            ScriptedBehavior::EmptyReply => Ok(ChatResponse {
                content: String::new(),
                model: "scripted-1".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

/// Test server configuration
pub fn create_test_config() -> Arc<ServerConfig> {
    Arc::new(ServerConfig {
        http_port: 0,
        log_level: LogLevel::Warn,
        environment: Environment::Testing,
        database_url: DatabaseUrl::Memory,
        auth: AuthConfig {
            jwt_secret: generate_jwt_secret().to_vec(),
            jwt_expiry_hours: 24,
        },
        ai: AiConfig::default(),
    })
}

/// Full resource bundle with a scripted LLM provider
pub async fn create_test_resources(llm: ScriptedLlmProvider) -> Arc<ServerResources> {
    let database = create_test_database().await;
    let auth_manager = create_test_auth_manager();
    Arc::new(ServerResources::new(
        database,
        auth_manager,
        Arc::new(llm),
        create_test_config(),
    ))
}

/// Create a user (with profile) directly in the store and mint a bearer token
pub async fn create_test_user(resources: &Arc<ServerResources>) -> (User, String) {
    let user = User::new(
        format!("user-{}@example.com", uuid::Uuid::new_v4()),
        hash_password("test-password").unwrap(),
        Some("Test User".to_owned()),
    );
    resources.database.create_user(&user).await.unwrap();
    resources
        .database
        .create_profile(user.id, &user.email)
        .await
        .unwrap();

    let token = resources.auth_manager.generate_token(&user).unwrap();
    (user, format!("Bearer {token}"))
}

/// Build and execute one HTTP request against a router, returning the status
/// and the parsed JSON body (`null` when the body is empty)
pub async fn send_request(
    router: Router,
    method: Method,
    uri: &str,
    auth: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}
