// ABOUTME: Dashboard route handlers for the authenticated home screen
// ABOUTME: Profile summary with BMI, recent achievements and weekly goal progress
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard routes
//!
//! Aggregates the data the home screen renders: the caller's profile summary
//! (with BMI), the most recent achievements, and the current week's goals
//! with progress percentages.

use crate::{
    constants::limits, errors::AppError, models::{Achievement, UserGoal},
    routes::authenticate, server::ServerResources,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Profile summary block of the dashboard
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileSummary {
    /// Full name for the greeting
    pub full_name: Option<String>,
    /// Current weight in kilograms
    pub weight: Option<f64>,
    /// Height in centimeters
    pub height: Option<f64>,
    /// Primary goal
    pub goal: Option<String>,
    /// Self-reported fitness level
    pub fitness_level: Option<String>,
    /// BMI rounded to one decimal, absent when inputs are missing
    pub bmi: Option<f64>,
    /// BMI formatted for display, `"--"` when absent
    pub bmi_display: String,
}

/// A weekly goal with its computed progress
#[derive(Debug, Serialize, Deserialize)]
pub struct GoalProgress {
    /// The goal record
    #[serde(flatten)]
    pub goal: UserGoal,
    /// Progress towards the target as a percentage, capped at 100
    pub progress_percent: f64,
}

/// Response body for the dashboard
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// Profile summary with BMI
    pub profile: Option<ProfileSummary>,
    /// Most recently unlocked achievements
    pub recent_achievements: Vec<Achievement>,
    /// Current-week goals with progress
    pub weekly_goals: Vec<GoalProgress>,
}

/// Dashboard route handlers
pub struct DashboardRoutes;

impl DashboardRoutes {
    /// Create all dashboard routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/dashboard", get(Self::get_dashboard))
            .with_state(resources)
    }

    /// Build the dashboard for the caller
    async fn get_dashboard(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let profile = resources.database.get_profile(auth.user_id).await?;
        let achievements = resources
            .database
            .list_recent_achievements(auth.user_id, limits::DASHBOARD_RECENT_ACHIEVEMENTS)
            .await?;
        let goals = resources
            .database
            .list_goals_since(auth.user_id, start_of_week(Utc::now().date_naive()))
            .await?;

        let response = DashboardResponse {
            profile: profile.map(|p| ProfileSummary {
                bmi: p.bmi(),
                bmi_display: p.bmi_display(),
                full_name: p.full_name,
                weight: p.weight,
                height: p.height,
                goal: p.goal,
                fitness_level: p.fitness_level,
            }),
            recent_achievements: achievements,
            weekly_goals: goals
                .into_iter()
                .map(|goal| GoalProgress {
                    progress_percent: goal.progress_percent(),
                    goal,
                })
                .collect(),
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}

/// First day (Sunday) of the week containing `date`
#[must_use]
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let days_from_sunday = i64::from(date.weekday().num_days_from_sunday());
    date - Duration::days(days_from_sunday)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_of_week_is_sunday() {
        // 2025-06-18 is a Wednesday; the week starts 2025-06-15 (Sunday)
        let wednesday = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        assert_eq!(
            start_of_week(wednesday),
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
        );

        // A Sunday is its own week start
        let sunday = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(start_of_week(sunday), sunday);
    }
}
