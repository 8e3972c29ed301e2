// ABOUTME: Exercise library route handlers
// ABOUTME: Full-table list with substring/category filtering, plus single reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exercise library routes
//!
//! The list endpoint fetches the full table ordered by title and applies a
//! pure in-memory filter: case-insensitive substring match on the title or
//! any muscle group, plus equality filters on module and difficulty. No
//! pagination, no server-side query planning.

use crate::{
    errors::AppError,
    models::{DifficultyLevel, Exercise, ModuleType},
    routes::authenticate,
    server::ServerResources,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Query parameters for the exercise list
#[derive(Debug, Default, Deserialize)]
pub struct ExerciseListQuery {
    /// Search term matched against title and muscle groups
    #[serde(default)]
    pub q: Option<String>,
    /// Module filter (`home` / `advanced`)
    #[serde(default)]
    pub module: Option<String>,
    /// Difficulty filter (`beginner` / `intermediate` / `advanced`)
    #[serde(default)]
    pub difficulty: Option<String>,
}

/// Response body for the exercise list
#[derive(Debug, Serialize, Deserialize)]
pub struct ExerciseListResponse {
    /// Matching exercises, ordered by title
    pub exercises: Vec<Exercise>,
    /// Number of matches
    pub total: usize,
}

/// Exercise route handlers
pub struct ExerciseRoutes;

impl ExerciseRoutes {
    /// Create all exercise routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/exercises", get(Self::list_exercises))
            .route("/api/exercises/:exercise_id", get(Self::get_exercise))
            .with_state(resources)
    }

    /// List the exercise library with optional filters
    async fn list_exercises(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
        Query(query): Query<ExerciseListQuery>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;

        let module = match query.module.as_deref() {
            None | Some("all") => None,
            Some(raw) => Some(
                ModuleType::parse(raw)
                    .ok_or_else(|| AppError::invalid_input(format!("Unknown module: {raw}")))?,
            ),
        };
        let difficulty = match query.difficulty.as_deref() {
            None | Some("all") => None,
            Some(raw) => Some(
                DifficultyLevel::parse(raw)
                    .ok_or_else(|| AppError::invalid_input(format!("Unknown difficulty: {raw}")))?,
            ),
        };

        let all = resources.database.list_exercises().await?;
        let exercises = filter_exercises(all, query.q.as_deref(), module, difficulty);

        let total = exercises.len();
        Ok((
            StatusCode::OK,
            Json(ExerciseListResponse { exercises, total }),
        )
            .into_response())
    }

    /// Get a single exercise by id
    async fn get_exercise(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
        Path(exercise_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;

        let exercise = resources
            .database
            .get_exercise(exercise_id)
            .await?
            .ok_or_else(|| AppError::not_found("Exercise"))?;

        Ok((StatusCode::OK, Json(exercise)).into_response())
    }
}

/// Filter exercises the way the library page does: case-insensitive substring
/// match of the search term against the title or any muscle group, and
/// equality on module/difficulty when selected.
#[must_use]
pub fn filter_exercises(
    exercises: Vec<Exercise>,
    search: Option<&str>,
    module: Option<ModuleType>,
    difficulty: Option<DifficultyLevel>,
) -> Vec<Exercise> {
    let needle = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    exercises
        .into_iter()
        .filter(|exercise| {
            if let Some(ref needle) = needle {
                let title_match = exercise.title.to_lowercase().contains(needle);
                let muscle_match = exercise
                    .muscle_groups
                    .iter()
                    .any(|group| group.to_lowercase().contains(needle));
                if !title_match && !muscle_match {
                    return false;
                }
            }
            if let Some(module) = module {
                if exercise.module_type != module {
                    return false;
                }
            }
            if let Some(difficulty) = difficulty {
                if exercise.difficulty_level != difficulty {
                    return false;
                }
            }
            true
        })
        .collect()
}
