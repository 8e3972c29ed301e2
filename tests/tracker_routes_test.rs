// ABOUTME: Integration tests for the progress tracker route handlers
// ABOUTME: Covers workouts, goals, measurements, meal plans and subscribe
#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(missing_docs)]

mod common;

use axum::http::{Method, StatusCode};
use chrono::Utc;
use common::{create_test_resources, create_test_user, send_request, ScriptedLlmProvider};
use ritmo_server::routes::tracker::TrackerRoutes;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_workout_lifecycle() {
    let resources = create_test_resources(ScriptedLlmProvider::replying("oi")).await;
    let (_, auth) = create_test_user(&resources).await;
    let router = TrackerRoutes::routes(resources.clone());

    let today = Utc::now().date_naive().to_string();
    let (status, body) = send_request(
        router.clone(),
        Method::POST,
        "/api/workouts",
        Some(&auth),
        Some(json!({"scheduled_date": today, "notes": "treino de pernas"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let workout_id = body["id"].as_str().unwrap().to_owned();
    assert!(body["completed_date"].is_null());

    // A workout referencing an unknown exercise is rejected
    let (status, _) = send_request(
        router.clone(),
        Method::POST,
        "/api/workouts",
        Some(&auth),
        Some(json!({"exercise_id": Uuid::new_v4()})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Complete with session results
    let (status, _) = send_request(
        router.clone(),
        Method::PUT,
        &format!("/api/workouts/{workout_id}/complete"),
        Some(&auth),
        Some(json!({"duration_minutes": 45, "sets_completed": 4, "difficulty_rating": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_request(
        router.clone(),
        Method::GET,
        "/api/workouts",
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let workouts = body.as_array().unwrap();
    assert_eq!(workouts.len(), 1);
    assert_eq!(workouts[0]["duration_minutes"], 45);
    assert!(!workouts[0]["completed_date"].is_null());

    // An out-of-range rating is rejected
    let (status, _) = send_request(
        router,
        Method::PUT,
        &format!("/api/workouts/{workout_id}/complete"),
        Some(&auth),
        Some(json!({"difficulty_rating": 9})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_goal_progress_auto_completes_at_target() {
    let resources = create_test_resources(ScriptedLlmProvider::replying("oi")).await;
    let (_, auth) = create_test_user(&resources).await;
    let router = TrackerRoutes::routes(resources.clone());

    let (status, body) = send_request(
        router.clone(),
        Method::POST,
        "/api/goals",
        Some(&auth),
        Some(json!({
            "goal_type": "workouts",
            "target_value": 3.0,
            "week_start": "2026-08-02"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let goal_id = body["id"].as_str().unwrap().to_owned();
    assert_eq!(body["completed"], false);

    let (status, body) = send_request(
        router.clone(),
        Method::PUT,
        &format!("/api/goals/{goal_id}/progress"),
        Some(&auth),
        Some(json!({"current_value": 2.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completed"], false);
    assert_eq!(body["current_value"], 2.0);

    let (status, body) = send_request(
        router.clone(),
        Method::PUT,
        &format!("/api/goals/{goal_id}/progress"),
        Some(&auth),
        Some(json!({"current_value": 3.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completed"], true);
    assert!(!body["completed_at"].is_null());

    // Listing from that week includes the goal
    let (status, body) = send_request(
        router,
        Method::GET,
        "/api/goals?week_start=2026-08-02",
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_goal_updates_are_scoped_to_the_owner() {
    let resources = create_test_resources(ScriptedLlmProvider::replying("oi")).await;
    let (_, auth_a) = create_test_user(&resources).await;
    let (_, auth_b) = create_test_user(&resources).await;
    let router = TrackerRoutes::routes(resources.clone());

    let (_, body) = send_request(
        router.clone(),
        Method::POST,
        "/api/goals",
        Some(&auth_a),
        Some(json!({"goal_type": "water", "target_value": 14.0, "week_start": "2026-08-02"})),
    )
    .await;
    let goal_id = body["id"].as_str().unwrap().to_owned();

    // Another user cannot touch it
    let (status, _) = send_request(
        router,
        Method::PUT,
        &format!("/api/goals/{goal_id}/progress"),
        Some(&auth_b),
        Some(json!({"current_value": 5.0})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_progress_entries_are_listed_most_recent_first() {
    let resources = create_test_resources(ScriptedLlmProvider::replying("oi")).await;
    let (_, auth) = create_test_user(&resources).await;
    let router = TrackerRoutes::routes(resources.clone());

    for (date, weight) in [("2026-07-01", 72.0), ("2026-08-01", 70.5)] {
        let (status, _) = send_request(
            router.clone(),
            Method::POST,
            "/api/progress",
            Some(&auth),
            Some(json!({"measurement_date": date, "weight": weight})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) =
        send_request(router, Method::GET, "/api/progress", Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["measurement_date"], "2026-08-01");
    assert_eq!(entries[0]["weight"], 70.5);
}

#[tokio::test]
async fn test_meal_plans_for_a_day() {
    let resources = create_test_resources(ScriptedLlmProvider::replying("oi")).await;
    let (_, auth) = create_test_user(&resources).await;
    let router = TrackerRoutes::routes(resources.clone());

    let (status, body) = send_request(
        router.clone(),
        Method::POST,
        "/api/meal-plans",
        Some(&auth),
        Some(json!({
            "date": "2026-08-08",
            "meal_type": "lunch",
            "custom_meal": "Arroz, feijão e frango",
            "calories": 550
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let plan_id = body["id"].as_str().unwrap().to_owned();

    let (status, _) = send_request(
        router.clone(),
        Method::PUT,
        &format!("/api/meal-plans/{plan_id}/complete"),
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_request(
        router.clone(),
        Method::GET,
        "/api/meal-plans?date=2026-08-08",
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let plans = body.as_array().unwrap();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0]["completed"], true);

    // Other days stay empty
    let (status, body) = send_request(
        router,
        Method::GET,
        "/api/meal-plans?date=2026-08-09",
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_subscribe_is_public_and_idempotent() {
    let resources = create_test_resources(ScriptedLlmProvider::replying("oi")).await;
    let router = TrackerRoutes::routes(resources.clone());

    let (status, body) = send_request(
        router.clone(),
        Method::POST,
        "/api/subscribe",
        None,
        Some(json!({"email": "News@Example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "news@example.com");
    assert_eq!(body["subscribed"], true);

    // Subscribing again reactivates rather than failing
    let (status, _) = send_request(
        router.clone(),
        Method::POST,
        "/api/subscribe",
        None,
        Some(json!({"email": "news@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send_request(
        router,
        Method::POST,
        "/api/subscribe",
        None,
        Some(json!({"email": "not-an-email"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
