// ABOUTME: Profile settings route handlers
// ABOUTME: Read and update the caller's wellness profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Profile settings routes
//!
//! Backs the settings page: read the caller's profile and update its mutable
//! fields (name, age, height, weight, goal, fitness level, diet preference).

use crate::{
    database::ProfileUpdate, errors::AppError, routes::authenticate, server::ServerResources,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use std::sync::Arc;

/// Profile route handlers
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all profile routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/profile", get(Self::get_profile))
            .route("/api/profile", put(Self::update_profile))
            .with_state(resources)
    }

    /// Get the caller's profile
    async fn get_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let profile = resources
            .database
            .get_profile(auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile"))?;

        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Update the caller's profile settings
    async fn update_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
        Json(update): Json<ProfileUpdate>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        if let Some(age) = update.age {
            if !(0..=130).contains(&age) {
                return Err(AppError::invalid_input("Age is out of range"));
            }
        }
        if update.height.is_some_and(|h| h <= 0.0) || update.weight.is_some_and(|w| w <= 0.0) {
            return Err(AppError::invalid_input(
                "Height and weight must be positive",
            ));
        }

        let updated = resources
            .database
            .update_profile(auth.user_id, &update)
            .await?;
        if !updated {
            return Err(AppError::not_found("Profile"));
        }

        let profile = resources
            .database
            .get_profile(auth.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile"))?;

        Ok((StatusCode::OK, Json(profile)).into_response())
    }
}
