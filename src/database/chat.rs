// ABOUTME: Chat message storage operations
// ABOUTME: Append-only inserts and chronological reads for the chat_messages table
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::users::{parse_timestamp, parse_uuid};
use super::{db_err, to_json_text, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{ChatMessage, MessageType};
use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

/// Payload for appending one side of a conversation turn.
///
/// Rows are immutable once written: there is no update path, and every
/// accepted user message is followed by exactly one ai row.
#[derive(Debug, Clone)]
pub struct NewChatMessage {
    /// Owning user
    pub user_id: Uuid,
    /// Who authored the message
    pub message_type: MessageType,
    /// Message text
    pub content: String,
    /// Attached image URLs, when the user sent a photo
    pub image_urls: Option<Vec<String>>,
    /// Free-form context payload
    pub context_data: Option<serde_json::Value>,
}

impl NewChatMessage {
    /// Build a user-authored message
    #[must_use]
    pub fn user(user_id: Uuid, content: impl Into<String>, image_urls: Option<Vec<String>>) -> Self {
        Self {
            user_id,
            message_type: MessageType::User,
            content: content.into(),
            image_urls,
            context_data: None,
        }
    }

    /// Build an ai-authored reply
    #[must_use]
    pub fn ai(user_id: Uuid, content: impl Into<String>) -> Self {
        Self {
            user_id,
            message_type: MessageType::Ai,
            content: content.into(),
            image_urls: None,
            context_data: None,
        }
    }
}

impl Database {
    /// Create the chat_messages table
    pub(super) async fn migrate_chat(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS chat_messages (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                message_type TEXT NOT NULL CHECK (message_type IN ('user', 'ai')),
                content TEXT NOT NULL,
                image_urls TEXT,
                context_data TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to create chat_messages table"))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_chat_messages_user_created
             ON chat_messages(user_id, created_at)",
        )
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to create chat_messages index"))?;

        Ok(())
    }

    /// Append a message to a user's conversation
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_chat_message(&self, message: &NewChatMessage) -> AppResult<ChatMessage> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO chat_messages (id, user_id, message_type, content, image_urls, context_data, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(id.to_string())
        .bind(message.user_id.to_string())
        .bind(message.message_type.as_str())
        .bind(&message.content)
        .bind(message.image_urls.as_deref().map(to_json_text))
        .bind(message.context_data.as_ref().map(ToString::to_string))
        .bind(now.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to insert chat message"))?;

        Ok(ChatMessage {
            id,
            user_id: message.user_id,
            message_type: message.message_type,
            content: message.content.clone(),
            image_urls: message.image_urls.clone(),
            context_data: message.context_data.clone(),
            created_at: now,
        })
    }

    /// Get a user's full conversation history in chronological order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt
    pub async fn list_chat_messages(&self, user_id: Uuid) -> AppResult<Vec<ChatMessage>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, message_type, content, image_urls, context_data, created_at
            FROM chat_messages
            WHERE user_id = $1
            ORDER BY created_at ASC, rowid ASC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(self.pool())
        .await
        .map_err(db_err("Failed to list chat messages"))?;

        rows.into_iter().map(row_to_chat_message).collect()
    }

    /// Count a user's stored messages
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_chat_messages(&self, user_id: Uuid) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM chat_messages WHERE user_id = $1")
            .bind(user_id.to_string())
            .fetch_one(self.pool())
            .await
            .map_err(db_err("Failed to count chat messages"))?;

        Ok(row.get("count"))
    }
}

fn row_to_chat_message(row: sqlx::sqlite::SqliteRow) -> AppResult<ChatMessage> {
    let type_raw: String = row.get("message_type");

    Ok(ChatMessage {
        id: parse_uuid(&row.get::<String, _>("id"))?,
        user_id: parse_uuid(&row.get::<String, _>("user_id"))?,
        message_type: MessageType::parse(&type_raw)
            .ok_or_else(|| AppError::database(format!("Unknown message_type: {type_raw}")))?,
        content: row.get("content"),
        image_urls: row
            .get::<Option<String>, _>("image_urls")
            .and_then(|s| serde_json::from_str(&s).ok()),
        context_data: row
            .get::<Option<String>, _>("context_data")
            .and_then(|s| serde_json::from_str(&s).ok()),
        created_at: parse_timestamp(&row.get::<String, _>("created_at"))?,
    })
}
