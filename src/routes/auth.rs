// ABOUTME: User authentication route handlers for registration and login
// ABOUTME: REST endpoints for account creation and JWT issuance
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication routes for user management
//!
//! Handles user registration and login. Registration also creates the empty
//! wellness profile the settings page edits later.

use crate::{
    auth::{hash_password, verify_password},
    errors::AppError,
    models::User,
    server::ServerResources,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// User registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// User registration response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: String,
    pub message: String,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User info for login response
#[derive(Debug, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// User login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub jwt_token: String,
    pub expires_at: String,
    pub user: UserInfo,
}

/// Authentication route handlers
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::register))
            .route("/api/auth/login", post(Self::login))
            .with_state(resources)
    }

    /// Register a new user account and its empty profile
    async fn register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let email = request.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::invalid_input("A valid email is required"));
        }
        if request.password.len() < 8 {
            return Err(AppError::invalid_input(
                "Password must be at least 8 characters",
            ));
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new(email.clone(), password_hash, request.display_name);

        let user_id = resources.database.create_user(&user).await?;
        resources.database.create_profile(user_id, &email).await?;

        info!(user_id = %user_id, "Registered new user");

        let response = RegisterResponse {
            user_id: user_id.to_string(),
            message: "User registered successfully".to_owned(),
        };

        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Log in with email and password, returning a JWT
    async fn login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let email = request.email.trim().to_lowercase();

        let user = resources
            .database
            .get_user_by_email(&email)
            .await?
            .ok_or_else(|| AppError::auth_invalid("Invalid email or password"))?;

        if !user.is_active || !verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::auth_invalid("Invalid email or password"));
        }

        let token = resources.auth_manager.generate_token(&user)?;
        let expires_at = chrono::Utc::now()
            + Duration::hours(resources.auth_manager.token_expiry_hours());

        resources.database.update_last_active(user.id).await?;

        let response = LoginResponse {
            jwt_token: token,
            expires_at: expires_at.to_rfc3339(),
            user: UserInfo {
                user_id: user.id.to_string(),
                email: user.email,
                display_name: user.display_name,
            },
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
