// ABOUTME: Application constants and configuration defaults
// ABOUTME: Single place for environment variable names, defaults and limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application constants
//!
//! Environment variable names, default values and hard limits referenced
//! across the crate. Keeping them here avoids magic strings in handlers.

/// Environment variable names
pub mod env_vars {
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Log level (error, warn, info, debug, trace)
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    /// Database URL (`sqlite:path` or `sqlite::memory:`)
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// JWT signing secret; generated at boot when unset
    pub const JWT_SECRET: &str = "JWT_SECRET";
    /// JWT expiry in hours
    pub const JWT_EXPIRY_HOURS: &str = "JWT_EXPIRY_HOURS";
    /// Gemini API key
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Gemini model override
    pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
}

/// Default configuration values
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8081;
    /// Default SQLite database path
    pub const DATABASE_URL: &str = "sqlite:./data/ritmo.db";
    /// Default JWT expiry in hours
    pub const JWT_EXPIRY_HOURS: i64 = 24;
}

/// Hard limits
pub mod limits {
    /// Recent achievements shown on the dashboard
    pub const DASHBOARD_RECENT_ACHIEVEMENTS: i64 = 5;
    /// Maximum accepted chat message length in characters
    pub const MAX_CHAT_MESSAGE_CHARS: usize = 4000;
}

/// Service identity
pub mod service {
    /// Service name used in logs
    pub const NAME: &str = "ritmo-server";
}
