// ABOUTME: User profile storage operations
// ABOUTME: Schema migration, upsert and settings updates for the profiles table
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::users::{parse_timestamp, parse_uuid};
use super::{db_err, Database};
use crate::errors::AppResult;
use crate::models::Profile;
use chrono::Utc;
use serde::Deserialize;
use sqlx::Row;
use uuid::Uuid;

/// Mutable profile fields accepted from the settings page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    /// Full name shown in greetings
    pub full_name: Option<String>,
    /// Age in years
    pub age: Option<i64>,
    /// Height in centimeters
    pub height: Option<f64>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    /// Primary goal
    pub goal: Option<String>,
    /// Self-reported fitness level
    pub fitness_level: Option<String>,
    /// Dietary preference
    pub diet_preference: Option<String>,
}

impl Database {
    /// Create the profiles table
    pub(super) async fn migrate_profiles(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS profiles (
                id TEXT PRIMARY KEY,
                user_id TEXT UNIQUE NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                full_name TEXT,
                email TEXT,
                age INTEGER,
                height REAL,
                weight REAL,
                goal TEXT,
                fitness_level TEXT,
                diet_preference TEXT,
                avatar_url TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to create profiles table"))?;

        Ok(())
    }

    /// Create an empty profile for a freshly registered user
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_profile(&self, user_id: Uuid, email: &str) -> AppResult<Profile> {
        let now = Utc::now();
        let profile = Profile {
            id: Uuid::new_v4(),
            user_id,
            full_name: None,
            email: Some(email.to_owned()),
            age: None,
            height: None,
            weight: None,
            goal: None,
            fitness_level: None,
            diet_preference: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r"
            INSERT INTO profiles (id, user_id, email, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ",
        )
        .bind(profile.id.to_string())
        .bind(user_id.to_string())
        .bind(&profile.email)
        .bind(now.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to create profile"))?;

        Ok(profile)
    }

    /// Get the profile owned by a user
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is corrupt
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, full_name, email, age, height, weight, goal,
                   fitness_level, diet_preference, avatar_url, created_at, updated_at
            FROM profiles
            WHERE user_id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(db_err("Failed to get profile"))?;

        row.map(|r| {
            Ok(Profile {
                id: parse_uuid(&r.get::<String, _>("id"))?,
                user_id: parse_uuid(&r.get::<String, _>("user_id"))?,
                full_name: r.get("full_name"),
                email: r.get("email"),
                age: r.get("age"),
                height: r.get("height"),
                weight: r.get("weight"),
                goal: r.get("goal"),
                fitness_level: r.get("fitness_level"),
                diet_preference: r.get("diet_preference"),
                avatar_url: r.get("avatar_url"),
                created_at: parse_timestamp(&r.get::<String, _>("created_at"))?,
                updated_at: parse_timestamp(&r.get::<String, _>("updated_at"))?,
            })
        })
        .transpose()
    }

    /// Update the mutable profile fields, stamping `updated_at`
    ///
    /// Returns whether a row was updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE profiles SET
                full_name = $2,
                age = $3,
                height = $4,
                weight = $5,
                goal = $6,
                fitness_level = $7,
                diet_preference = $8,
                updated_at = $9
            WHERE user_id = $1
            ",
        )
        .bind(user_id.to_string())
        .bind(&update.full_name)
        .bind(update.age)
        .bind(update.height)
        .bind(update.weight)
        .bind(&update.goal)
        .bind(&update.fitness_level)
        .bind(&update.diet_preference)
        .bind(Utc::now().to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to update profile"))?;

        Ok(result.rows_affected() > 0)
    }
}
