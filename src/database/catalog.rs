// ABOUTME: Exercise and recipe catalog storage operations
// ABOUTME: Schema migration, seeding inserts and ordered list reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::users::{parse_timestamp, parse_uuid};
use super::{db_err, json_string_list, to_json_text, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{DifficultyLevel, Exercise, ModuleType, Recipe};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the exercises and recipes tables
    pub(super) async fn migrate_catalog(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                instructions TEXT,
                benefits TEXT,
                contraindications TEXT,
                observations TEXT,
                module_type TEXT NOT NULL CHECK (module_type IN ('home', 'advanced')),
                difficulty_level TEXT NOT NULL CHECK (difficulty_level IN ('beginner', 'intermediate', 'advanced')),
                duration INTEGER,
                calories_burned INTEGER,
                youtube_url TEXT,
                image_urls TEXT,
                muscle_groups TEXT,
                equipment_needed TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to create exercises table"))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                ingredients TEXT,
                instructions TEXT,
                prep_time INTEGER,
                cook_time INTEGER,
                servings INTEGER,
                calories_per_serving INTEGER,
                goal_category TEXT,
                diet_type TEXT,
                difficulty TEXT,
                image_url TEXT,
                nutritional_info TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to create recipes table"))?;

        Ok(())
    }

    // ========================================================================
    // Exercises
    // ========================================================================

    /// Insert an exercise into the library (used by seeding)
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_exercise(&self, exercise: &Exercise) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO exercises (
                id, title, description, instructions, benefits, contraindications,
                observations, module_type, difficulty_level, duration, calories_burned,
                youtube_url, image_urls, muscle_groups, equipment_needed, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ",
        )
        .bind(exercise.id.to_string())
        .bind(&exercise.title)
        .bind(&exercise.description)
        .bind(&exercise.instructions)
        .bind(&exercise.benefits)
        .bind(&exercise.contraindications)
        .bind(&exercise.observations)
        .bind(exercise.module_type.as_str())
        .bind(exercise.difficulty_level.as_str())
        .bind(exercise.duration)
        .bind(exercise.calories_burned)
        .bind(&exercise.youtube_url)
        .bind(to_json_text(&exercise.image_urls))
        .bind(to_json_text(&exercise.muscle_groups))
        .bind(to_json_text(&exercise.equipment_needed))
        .bind(exercise.created_at.to_rfc3339())
        .bind(exercise.updated_at.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to insert exercise"))?;

        Ok(())
    }

    /// List the full exercise library ordered by title
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt
    pub async fn list_exercises(&self) -> AppResult<Vec<Exercise>> {
        let rows = sqlx::query("SELECT * FROM exercises ORDER BY title")
            .fetch_all(self.pool())
            .await
            .map_err(db_err("Failed to list exercises"))?;

        rows.into_iter().map(row_to_exercise).collect()
    }

    /// Get a single exercise by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is corrupt
    pub async fn get_exercise(&self, exercise_id: Uuid) -> AppResult<Option<Exercise>> {
        let row = sqlx::query("SELECT * FROM exercises WHERE id = $1")
            .bind(exercise_id.to_string())
            .fetch_optional(self.pool())
            .await
            .map_err(db_err("Failed to get exercise"))?;

        row.map(row_to_exercise).transpose()
    }

    // ========================================================================
    // Recipes
    // ========================================================================

    /// Insert a recipe into the library (used by seeding)
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_recipe(&self, recipe: &Recipe) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO recipes (
                id, title, description, ingredients, instructions, prep_time, cook_time,
                servings, calories_per_serving, goal_category, diet_type, difficulty,
                image_url, nutritional_info, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ",
        )
        .bind(recipe.id.to_string())
        .bind(&recipe.title)
        .bind(&recipe.description)
        .bind(to_json_text(&recipe.ingredients))
        .bind(to_json_text(&recipe.instructions))
        .bind(recipe.prep_time)
        .bind(recipe.cook_time)
        .bind(recipe.servings)
        .bind(recipe.calories_per_serving)
        .bind(&recipe.goal_category)
        .bind(&recipe.diet_type)
        .bind(&recipe.difficulty)
        .bind(&recipe.image_url)
        .bind(recipe.nutritional_info.as_ref().map(ToString::to_string))
        .bind(recipe.created_at.to_rfc3339())
        .bind(recipe.updated_at.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to insert recipe"))?;

        Ok(())
    }

    /// List the full recipe library ordered by title
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt
    pub async fn list_recipes(&self) -> AppResult<Vec<Recipe>> {
        let rows = sqlx::query("SELECT * FROM recipes ORDER BY title")
            .fetch_all(self.pool())
            .await
            .map_err(db_err("Failed to list recipes"))?;

        rows.into_iter().map(row_to_recipe).collect()
    }

    /// Get a single recipe by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is corrupt
    pub async fn get_recipe(&self, recipe_id: Uuid) -> AppResult<Option<Recipe>> {
        let row = sqlx::query("SELECT * FROM recipes WHERE id = $1")
            .bind(recipe_id.to_string())
            .fetch_optional(self.pool())
            .await
            .map_err(db_err("Failed to get recipe"))?;

        row.map(row_to_recipe).transpose()
    }
}

fn row_to_exercise(row: sqlx::sqlite::SqliteRow) -> AppResult<Exercise> {
    let module_raw: String = row.get("module_type");
    let difficulty_raw: String = row.get("difficulty_level");

    Ok(Exercise {
        id: parse_uuid(&row.get::<String, _>("id"))?,
        title: row.get("title"),
        description: row.get("description"),
        instructions: row.get("instructions"),
        benefits: row.get("benefits"),
        contraindications: row.get("contraindications"),
        observations: row.get("observations"),
        module_type: ModuleType::parse(&module_raw)
            .ok_or_else(|| AppError::database(format!("Unknown module_type: {module_raw}")))?,
        difficulty_level: DifficultyLevel::parse(&difficulty_raw).ok_or_else(|| {
            AppError::database(format!("Unknown difficulty_level: {difficulty_raw}"))
        })?,
        duration: row.get("duration"),
        calories_burned: row.get("calories_burned"),
        youtube_url: row.get("youtube_url"),
        image_urls: json_string_list(row.get("image_urls")),
        muscle_groups: json_string_list(row.get("muscle_groups")),
        equipment_needed: json_string_list(row.get("equipment_needed")),
        created_at: parse_timestamp(&row.get::<String, _>("created_at"))?,
        updated_at: parse_timestamp(&row.get::<String, _>("updated_at"))?,
    })
}

fn row_to_recipe(row: sqlx::sqlite::SqliteRow) -> AppResult<Recipe> {
    Ok(Recipe {
        id: parse_uuid(&row.get::<String, _>("id"))?,
        title: row.get("title"),
        description: row.get("description"),
        ingredients: json_string_list(row.get("ingredients")),
        instructions: json_string_list(row.get("instructions")),
        prep_time: row.get("prep_time"),
        cook_time: row.get("cook_time"),
        servings: row.get("servings"),
        calories_per_serving: row.get("calories_per_serving"),
        goal_category: row.get("goal_category"),
        diet_type: row.get("diet_type"),
        difficulty: row.get("difficulty"),
        image_url: row.get("image_url"),
        nutritional_info: row
            .get::<Option<String>, _>("nutritional_info")
            .and_then(|s| serde_json::from_str(&s).ok()),
        created_at: parse_timestamp(&row.get::<String, _>("created_at"))?,
        updated_at: parse_timestamp(&row.get::<String, _>("updated_at"))?,
    })
}
