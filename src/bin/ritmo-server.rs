// ABOUTME: Main server binary for the Meu Ritmo wellness API
// ABOUTME: Loads configuration, opens the database and serves the REST API
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Meu Ritmo API Server Binary
//!
//! Starts the wellness API with user authentication, SQLite storage and the
//! Mari chat proxy.

use anyhow::Result;
use clap::Parser;
use ritmo_server::{
    auth::AuthManager,
    config::ServerConfig,
    database::Database,
    llm::{GeminiProvider, LlmProvider},
    logging,
    server::{self, ServerResources},
};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "ritmo-server")]
#[command(about = "Meu Ritmo wellness API - workouts, recipes, tracking and AI coaching")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting Meu Ritmo API server");
    info!("{}", config.summary());

    let database = Arc::new(Database::new(&config.database_url.to_connection_string()).await?);
    info!("Database initialized: {}", config.database_url);

    let auth_manager = Arc::new(AuthManager::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiry_hours,
    ));

    let llm: Arc<dyn LlmProvider> = match config.ai.gemini_api_key.as_deref() {
        Some(key) => {
            Arc::new(GeminiProvider::new(key).with_default_model(config.ai.model.clone()))
        }
        None => {
            // Chat turns will answer with the fallback reply until a key is set
            warn!("GEMINI_API_KEY not set; chat replies will fall back to apology messages");
            Arc::new(GeminiProvider::new("").with_default_model(config.ai.model.clone()))
        }
    };

    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        llm,
        Arc::new(config),
    ));

    server::serve(resources).await?;

    Ok(())
}
