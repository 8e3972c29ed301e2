// ABOUTME: SQLite data layer for the Meu Ritmo server
// ABOUTME: Owns the connection pool, startup migrations and per-table operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Database Management
//!
//! Embedded SQLite storage for all persisted entities. The schema is the
//! fixed set of tables the application reads and writes through generic
//! row-level operations: no stored procedures, no views, no query planning
//! beyond `user_id` filters and timestamp ordering. Migrations are idempotent
//! `CREATE TABLE IF NOT EXISTS` statements run once at startup.

mod catalog;
mod chat;
mod profiles;
mod tracking;
mod users;

pub use chat::NewChatMessage;
pub use profiles::ProfileUpdate;
pub use tracking::{NewMealPlan, NewProgressEntry, NewUserGoal, NewWorkout, WorkoutCompletion};

use crate::errors::{AppError, AppResult};
use sqlx::{Pool, Sqlite, SqlitePool};

/// Database manager for all persisted entities
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration statement fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let pool = if database_url.contains(":memory:") {
            // A pooled :memory: database is per-connection; keep a single
            // connection so every query sees the migrated schema
            sqlx::sqlite::SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(database_url)
                .await
                .map_err(|e| AppError::database(format!("Failed to connect: {e}")))?
        } else {
            // Ensure SQLite creates the database file if it doesn't exist
            let connection_options = if database_url.starts_with("sqlite:") {
                format!("{database_url}?mode=rwc")
            } else {
                database_url.to_owned()
            };

            SqlitePool::connect(&connection_options)
                .await
                .map_err(|e| AppError::database(format!("Failed to connect: {e}")))?
        };

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_profiles().await?;
        self.migrate_catalog().await?;
        self.migrate_chat().await?;
        self.migrate_tracking().await?;
        Ok(())
    }
}

/// Map a sqlx error into the unified database error
pub(crate) fn db_err(context: &str) -> impl FnOnce(sqlx::Error) -> AppError + '_ {
    move |e| AppError::database(format!("{context}: {e}"))
}

/// Decode a JSON-text column into a string list, tolerating NULL
pub(crate) fn json_string_list(raw: Option<String>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

/// Encode a string list into its JSON-text column representation
pub(crate) fn to_json_text(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_owned())
}
