// ABOUTME: Configuration module for the Meu Ritmo server
// ABOUTME: Environment-based runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration management

/// Environment variable based configuration
pub mod environment;

pub use environment::{AiConfig, AuthConfig, DatabaseUrl, Environment, LogLevel, ServerConfig};
