// ABOUTME: Shared server resources and HTTP router assembly
// ABOUTME: Bundles database, auth, LLM provider and config; serves the API
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server resources and router assembly
//!
//! `ServerResources` is the dependency bundle shared by every route handler
//! through axum state. `router` merges the per-domain routers and applies the
//! cross-cutting layers: permissive CORS (the browser client calls from
//! another origin and preflights with `OPTIONS`) and request tracing.

use crate::{
    auth::AuthManager, config::ServerConfig, database::Database, errors::AppResult,
    llm::LlmProvider, routes,
};
use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Shared resources for all route handlers
pub struct ServerResources {
    /// Data layer
    pub database: Arc<Database>,
    /// JWT authentication manager
    pub auth_manager: Arc<AuthManager>,
    /// Upstream LLM provider
    pub llm: Arc<dyn LlmProvider>,
    /// Outbound HTTP client (image fetches)
    pub http_client: reqwest::Client,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Bundle the server resources
    #[must_use]
    pub fn new(
        database: Arc<Database>,
        auth_manager: Arc<AuthManager>,
        llm: Arc<dyn LlmProvider>,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            database,
            auth_manager,
            llm,
            http_client: reqwest::Client::new(),
            config,
        }
    }
}

/// Build the application router with all domain routes and layers
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(routes::HealthRoutes::routes())
        .merge(routes::AuthRoutes::routes(resources.clone()))
        .merge(routes::ChatRoutes::routes(resources.clone()))
        .merge(routes::ExerciseRoutes::routes(resources.clone()))
        .merge(routes::RecipeRoutes::routes(resources.clone()))
        .merge(routes::DashboardRoutes::routes(resources.clone()))
        .merge(routes::ProfileRoutes::routes(resources.clone()))
        .merge(routes::TrackerRoutes::routes(resources))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Serve the API until the process is stopped
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails
pub async fn serve(resources: Arc<ServerResources>) -> AppResult<()> {
    let port = resources.config.http_port;
    let app = router(resources);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .map_err(|e| crate::errors::AppError::internal(format!("Failed to bind port {port}: {e}")))?;

    info!(port, "HTTP server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| crate::errors::AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}
