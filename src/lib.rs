// ABOUTME: Main library entry point for the Meu Ritmo wellness API server
// ABOUTME: Provides the REST API for workouts, recipes, tracking and AI chat
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Meu Ritmo Server
//!
//! Self-hosted backend for the Meu Ritmo wellness application. It serves the
//! authenticated product surface over a REST API: the exercise and recipe
//! catalogs, per-user progress tracking (workouts, weekly goals, measurements,
//! meal plans, achievements), profile settings, and the "Mari" AI coach — a
//! single-turn chat proxy in front of Google's Gemini completion API that
//! durably records both sides of every exchange.
//!
//! ## Architecture
//!
//! - **Routes**: one module per domain, thin axum handlers over the data layer
//! - **Database**: embedded SQLite via `sqlx`, schema created at startup
//! - **LLM**: provider abstraction with a Gemini implementation
//! - **Auth**: JWT bearer tokens, bcrypt password hashes
//! - **Config**: environment variables only, loaded once at boot

/// JWT authentication and password hashing
pub mod auth;

/// Configuration management
pub mod config;

/// Application constants and environment variable names
pub mod constants;

/// SQLite data layer: migrations and per-table operations
pub mod database;

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// LLM provider abstraction for the AI chat integration
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Common data models for wellness data
pub mod models;

/// HTTP routes for the REST API
pub mod routes;

/// Shared server resources and router assembly
pub mod server;
