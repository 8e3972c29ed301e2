// ABOUTME: Chat proxy route handlers for the Mari AI coach
// ABOUTME: Forwards one message per turn to Gemini and records both sides
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat routes for the Mari AI coach
//!
//! The proxy accepts a user's text (optionally with one image reference),
//! obtains a completion under the fixed Mari persona, and durably records
//! both sides of the exchange. The upstream call is stateless single-turn:
//! each turn sends only the latest message, never prior turns.
//!
//! Upstream failures are never surfaced to the caller. The reply is replaced
//! by a static apology string, both rows are still written, and the turn
//! returns 200 — one ai row per user row always holds.

use crate::{
    constants::limits,
    database::NewChatMessage,
    errors::{AppError, ErrorCode},
    llm::{fallback_reply, get_mari_system_prompt, ChatRequest, FallbackKind, ImageAttachment},
    models::ChatMessage,
    routes::authenticate,
    server::ServerResources,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for a chat turn
#[derive(Debug, Deserialize)]
pub struct ChatProxyRequest {
    /// User's message text
    pub message: String,
    /// Optional image reference to analyze alongside the text
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
}

/// Response body for a chat turn
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatProxyResponse {
    /// Assistant's reply (real or fallback)
    pub response: String,
}

/// Response body for the conversation history
#[derive(Debug, Serialize, Deserialize)]
pub struct MessagesListResponse {
    /// Messages in chronological order
    pub messages: Vec<ChatMessage>,
}

// ============================================================================
// Chat Routes
// ============================================================================

/// Chat route handlers
pub struct ChatRoutes;

impl ChatRoutes {
    /// Create all chat routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/chat", post(Self::send_message))
            .route("/api/chat/messages", get(Self::list_messages))
            .with_state(resources)
    }

    /// Handle one chat turn: authorize, complete upstream, persist both rows
    async fn send_message(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
        Json(request): Json<ChatProxyRequest>,
    ) -> Result<Response, AppError> {
        // Authorization first: an invalid credential writes nothing
        let auth = authenticate(&headers, &resources)?;

        let message = request.message.trim();
        if message.is_empty() {
            return Err(AppError::invalid_input("Message must not be empty"));
        }
        if message.chars().count() > limits::MAX_CHAT_MESSAGE_CHARS {
            return Err(AppError::invalid_input("Message is too long"));
        }

        // The upstream exchange resolves before any row is written, so the
        // user row and its ai partner are always inserted back to back
        let reply = Self::obtain_reply(&resources, message, request.image_url.as_deref()).await;

        let image_urls = request.image_url.clone().map(|url| vec![url]);
        resources
            .database
            .insert_chat_message(&NewChatMessage::user(auth.user_id, message, image_urls))
            .await?;
        resources
            .database
            .insert_chat_message(&NewChatMessage::ai(auth.user_id, reply.as_str()))
            .await?;

        Ok((StatusCode::OK, Json(ChatProxyResponse { response: reply })).into_response())
    }

    /// Get the caller's conversation history in display order
    async fn list_messages(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let messages = resources.database.list_chat_messages(auth.user_id).await?;

        Ok((StatusCode::OK, Json(MessagesListResponse { messages })).into_response())
    }

    // ========================================================================
    // Upstream exchange
    // ========================================================================

    /// Obtain the assistant's reply, masking any upstream failure with a
    /// static apology string
    async fn obtain_reply(
        resources: &Arc<ServerResources>,
        message: &str,
        image_url: Option<&str>,
    ) -> String {
        match Self::complete_upstream(resources, message, image_url).await {
            Ok(content) if !content.trim().is_empty() => content,
            Ok(_) => {
                warn!("Upstream returned an empty reply");
                fallback_reply(FallbackKind::EmptyReply).to_owned()
            }
            Err(e) => {
                error!(error = %e, "Upstream AI call failed; substituting fallback reply");
                fallback_reply(Self::fallback_kind(&e)).to_owned()
            }
        }
    }

    /// Pick the apology string matching the failure
    const fn fallback_kind(error: &AppError) -> FallbackKind {
        match error.code {
            ErrorCode::ConfigError
            | ErrorCode::ExternalServiceError
            | ErrorCode::ExternalRateLimited => FallbackKind::Unavailable,
            ErrorCode::InternalError => FallbackKind::EmptyReply,
            _ => FallbackKind::Unexpected,
        }
    }

    /// Build and send the single-turn upstream request
    async fn complete_upstream(
        resources: &Arc<ServerResources>,
        message: &str,
        image_url: Option<&str>,
    ) -> Result<String, AppError> {
        // Persona prepended to the user's text as one prompt; the call is
        // stateless so prior turns are never resent
        let prompt = format!("{}\n\nUsuário: {message}", get_mari_system_prompt());

        let ai = &resources.config.ai;
        let mut chat_request = ChatRequest::new(vec![crate::llm::ChatMessage::user(prompt)])
            .with_model(&ai.model)
            .with_temperature(ai.temperature)
            .with_top_p(ai.top_p)
            .with_top_k(ai.top_k)
            .with_max_tokens(ai.max_output_tokens);

        if let Some(url) = image_url {
            if resources.llm.capabilities().supports_vision() {
                let image = Self::fetch_image(resources, url).await?;
                chat_request = chat_request.with_image(image);
            }
        }

        let response = resources.llm.complete(&chat_request).await?;
        Ok(response.content)
    }

    /// Fetch the referenced image and embed it inline as base64
    async fn fetch_image(
        resources: &Arc<ServerResources>,
        url: &str,
    ) -> Result<ImageAttachment, AppError> {
        let response = resources
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::external_service("image-fetch", e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                "image-fetch",
                format!("HTTP {}", response.status()),
            ));
        }

        let mime_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_owned();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::external_service("image-fetch", e.to_string()))?;

        Ok(ImageAttachment {
            mime_type,
            data: BASE64.encode(&bytes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_kind_selection() {
        let unavailable = AppError::config("no key");
        assert_eq!(
            ChatRoutes::fallback_kind(&unavailable),
            FallbackKind::Unavailable
        );

        let empty = AppError::internal("No content in Gemini response");
        assert_eq!(ChatRoutes::fallback_kind(&empty), FallbackKind::EmptyReply);

        let other = AppError::database("insert failed");
        assert_eq!(ChatRoutes::fallback_kind(&other), FallbackKind::Unexpected);
    }

    #[test]
    fn test_request_accepts_image_url_key() {
        let parsed: ChatProxyRequest =
            serde_json::from_str(r#"{"message": "oi", "imageUrl": "https://x/y.jpg"}"#).unwrap();
        assert_eq!(parsed.image_url.as_deref(), Some("https://x/y.jpg"));

        let no_image: ChatProxyRequest = serde_json::from_str(r#"{"message": "oi"}"#).unwrap();
        assert!(no_image.image_url.is_none());
    }
}
