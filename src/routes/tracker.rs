// ABOUTME: Progress tracker route handlers
// ABOUTME: Workouts, weekly goals, achievements, measurements, meal plans, subscribe
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Progress tracker routes
//!
//! Authenticated CRUD over the user-owned tracking tables: logged workouts,
//! weekly goals, unlocked achievements, body measurements and planned meals.
//! Also hosts the public newsletter subscribe endpoint used by the marketing
//! site.

use crate::{
    database::{NewMealPlan, NewProgressEntry, NewUserGoal, NewWorkout, WorkoutCompletion},
    errors::AppError,
    routes::{authenticate, dashboard::start_of_week},
    server::ServerResources,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Query parameters for listing goals
#[derive(Debug, Default, Deserialize)]
pub struct GoalListQuery {
    /// Only goals with `week_start` on or after this date; defaults to the
    /// current week
    #[serde(default)]
    pub week_start: Option<NaiveDate>,
}

/// Query parameters for listing meal plans
#[derive(Debug, Deserialize)]
pub struct MealPlanListQuery {
    /// Day to list meals for
    pub date: NaiveDate,
}

/// Request body for updating goal progress
#[derive(Debug, Deserialize)]
pub struct GoalProgressRequest {
    /// New accumulated value
    pub current_value: f64,
}

/// Request body for the subscribe endpoint
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    /// Subscriber email
    pub email: String,
}

/// Tracker route handlers
pub struct TrackerRoutes;

impl TrackerRoutes {
    /// Create all tracker routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workouts", post(Self::create_workout))
            .route("/api/workouts", get(Self::list_workouts))
            .route(
                "/api/workouts/:workout_id/complete",
                put(Self::complete_workout),
            )
            .route("/api/goals", post(Self::create_goal))
            .route("/api/goals", get(Self::list_goals))
            .route("/api/goals/:goal_id/progress", put(Self::update_goal))
            .route("/api/achievements", get(Self::list_achievements))
            .route("/api/progress", post(Self::create_progress_entry))
            .route("/api/progress", get(Self::list_progress_entries))
            .route("/api/meal-plans", post(Self::create_meal_plan))
            .route("/api/meal-plans", get(Self::list_meal_plans))
            .route(
                "/api/meal-plans/:plan_id/complete",
                put(Self::complete_meal_plan),
            )
            .route("/api/subscribe", post(Self::subscribe))
            .with_state(resources)
    }

    // ========================================================================
    // Workouts
    // ========================================================================

    /// Log a workout
    async fn create_workout(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
        Json(new): Json<NewWorkout>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        if let Some(exercise_id) = new.exercise_id {
            resources
                .database
                .get_exercise(exercise_id)
                .await?
                .ok_or_else(|| AppError::not_found("Exercise"))?;
        }

        let workout = resources.database.create_workout(auth.user_id, &new).await?;
        Ok((StatusCode::CREATED, Json(workout)).into_response())
    }

    /// List the caller's workouts
    async fn list_workouts(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let workouts = resources.database.list_workouts(auth.user_id).await?;
        Ok((StatusCode::OK, Json(workouts)).into_response())
    }

    /// Mark a workout as completed with session results
    async fn complete_workout(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
        Path(workout_id): Path<Uuid>,
        Json(completion): Json<WorkoutCompletion>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        if completion
            .difficulty_rating
            .is_some_and(|r| !(1..=5).contains(&r))
        {
            return Err(AppError::invalid_input("Difficulty rating must be 1-5"));
        }

        let updated = resources
            .database
            .complete_workout(workout_id, auth.user_id, &completion)
            .await?;
        if !updated {
            return Err(AppError::not_found("Workout"));
        }

        Ok((StatusCode::OK, Json(serde_json::json!({"success": true}))).into_response())
    }

    // ========================================================================
    // Weekly goals
    // ========================================================================

    /// Create a weekly goal
    async fn create_goal(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
        Json(new): Json<NewUserGoal>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        if new.goal_type.trim().is_empty() {
            return Err(AppError::invalid_input("Goal type must not be empty"));
        }

        let goal = resources.database.create_goal(auth.user_id, &new).await?;
        Ok((StatusCode::CREATED, Json(goal)).into_response())
    }

    /// List the caller's goals from a week onwards
    async fn list_goals(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
        Query(query): Query<GoalListQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let since = query
            .week_start
            .unwrap_or_else(|| start_of_week(Utc::now().date_naive()));
        let goals = resources.database.list_goals_since(auth.user_id, since).await?;

        Ok((StatusCode::OK, Json(goals)).into_response())
    }

    /// Update progress on a goal
    async fn update_goal(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
        Path(goal_id): Path<Uuid>,
        Json(request): Json<GoalProgressRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let goal = resources
            .database
            .update_goal_progress(goal_id, auth.user_id, request.current_value)
            .await?
            .ok_or_else(|| AppError::not_found("Goal"))?;

        Ok((StatusCode::OK, Json(goal)).into_response())
    }

    // ========================================================================
    // Achievements
    // ========================================================================

    /// List the caller's achievements
    async fn list_achievements(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let achievements = resources
            .database
            .list_recent_achievements(auth.user_id, i64::MAX)
            .await?;
        Ok((StatusCode::OK, Json(achievements)).into_response())
    }

    // ========================================================================
    // Progress entries
    // ========================================================================

    /// Record a body measurement entry
    async fn create_progress_entry(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
        Json(new): Json<NewProgressEntry>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let entry = resources
            .database
            .create_progress_entry(auth.user_id, &new)
            .await?;
        Ok((StatusCode::CREATED, Json(entry)).into_response())
    }

    /// List the caller's measurement entries
    async fn list_progress_entries(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let entries = resources.database.list_progress_entries(auth.user_id).await?;
        Ok((StatusCode::OK, Json(entries)).into_response())
    }

    // ========================================================================
    // Meal plans
    // ========================================================================

    /// Plan a meal for a day
    async fn create_meal_plan(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
        Json(new): Json<NewMealPlan>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        if let Some(recipe_id) = new.recipe_id {
            resources
                .database
                .get_recipe(recipe_id)
                .await?
                .ok_or_else(|| AppError::not_found("Recipe"))?;
        }

        let plan = resources.database.create_meal_plan(auth.user_id, &new).await?;
        Ok((StatusCode::CREATED, Json(plan)).into_response())
    }

    /// List the caller's meals for a day
    async fn list_meal_plans(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
        Query(query): Query<MealPlanListQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let plans = resources
            .database
            .list_meal_plans(auth.user_id, query.date)
            .await?;
        Ok((StatusCode::OK, Json(plans)).into_response())
    }

    /// Mark a planned meal as eaten
    async fn complete_meal_plan(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
        Path(plan_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let updated = resources
            .database
            .complete_meal_plan(plan_id, auth.user_id)
            .await?;
        if !updated {
            return Err(AppError::not_found("Meal plan"));
        }

        Ok((StatusCode::OK, Json(serde_json::json!({"success": true}))).into_response())
    }

    // ========================================================================
    // Subscribe
    // ========================================================================

    /// Subscribe an email to the newsletter (no authentication: this is the
    /// marketing site capture form)
    async fn subscribe(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
        Json(request): Json<SubscribeRequest>,
    ) -> Result<Response, AppError> {
        let email = request.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::invalid_input("A valid email is required"));
        }

        // Link the subscription to an account when the caller is logged in
        let user_id = authenticate(&headers, &resources).ok().map(|a| a.user_id);

        let subscriber = resources.database.upsert_subscriber(&email, user_id).await?;
        Ok((StatusCode::CREATED, Json(subscriber)).into_response())
    }
}
