// ABOUTME: Route module organization for the Meu Ritmo HTTP API
// ABOUTME: Centralized route definitions organized by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route modules for the Meu Ritmo server
//!
//! Routes are organized by domain for clear separation of concerns. Each
//! domain module contains route definitions and thin handler functions that
//! delegate to the data layer.

/// Authentication routes: registration and login
pub mod auth;
/// Chat proxy and conversation history routes
pub mod chat;
/// Dashboard summary routes
pub mod dashboard;
/// Exercise library routes
pub mod exercises;
/// Health check and system status routes
pub mod health;
/// Profile settings routes
pub mod profile;
/// Recipe library routes
pub mod recipes;
/// Progress tracker routes: workouts, goals, measurements, meals
pub mod tracker;

pub use auth::AuthRoutes;
pub use chat::ChatRoutes;
pub use dashboard::DashboardRoutes;
pub use exercises::ExerciseRoutes;
pub use health::HealthRoutes;
pub use profile::ProfileRoutes;
pub use recipes::RecipeRoutes;
pub use tracker::TrackerRoutes;

use crate::auth::AuthResult;
use crate::errors::AppError;
use crate::server::ServerResources;
use axum::http::HeaderMap;
use std::sync::Arc;

/// Extract and authenticate the caller from the `Authorization` header.
///
/// Runs before any store access: unauthenticated calls fail here with no
/// rows written.
pub(crate) fn authenticate(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> Result<AuthResult, AppError> {
    let auth_header = headers.get("authorization").and_then(|h| h.to_str().ok());
    resources.auth_manager.authenticate_header(auth_header)
}
