// ABOUTME: Integration tests for the exercise and recipe library routes
// ABOUTME: Covers list filtering semantics, empty results and single reads
#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(missing_docs)]

mod common;

use axum::http::{Method, StatusCode};
use chrono::Utc;
use common::{create_test_resources, create_test_user, send_request, ScriptedLlmProvider};
use ritmo_server::models::{DifficultyLevel, Exercise, ModuleType, Recipe};
use ritmo_server::routes::{exercises::ExerciseRoutes, recipes::RecipeRoutes};
use ritmo_server::server::ServerResources;
use std::sync::Arc;
use uuid::Uuid;

async fn seed_exercises(resources: &Arc<ServerResources>) -> Vec<Exercise> {
    let now = Utc::now();
    let make = |title: &str, module: ModuleType, level: DifficultyLevel, muscles: &[&str]| Exercise {
        id: Uuid::new_v4(),
        title: title.to_owned(),
        description: Some(format!("{title} para o dia a dia")),
        instructions: None,
        benefits: None,
        contraindications: None,
        observations: None,
        module_type: module,
        difficulty_level: level,
        duration: Some(15),
        calories_burned: Some(100),
        youtube_url: None,
        image_urls: Vec::new(),
        muscle_groups: muscles.iter().map(|s| (*s).to_owned()).collect(),
        equipment_needed: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    let exercises = vec![
        make(
            "Agachamento Livre",
            ModuleType::Home,
            DifficultyLevel::Beginner,
            &["Quadríceps", "Glúteos"],
        ),
        make(
            "Supino Reto",
            ModuleType::Advanced,
            DifficultyLevel::Intermediate,
            &["Peitoral", "Tríceps"],
        ),
        make(
            "Prancha",
            ModuleType::Home,
            DifficultyLevel::Beginner,
            &["Core"],
        ),
    ];
    for exercise in &exercises {
        resources.database.insert_exercise(exercise).await.unwrap();
    }
    exercises
}

async fn seed_recipes(resources: &Arc<ServerResources>) -> Vec<Recipe> {
    let now = Utc::now();
    let make = |title: &str, goal: &str, diet: Option<&str>, ingredients: &[&str]| Recipe {
        id: Uuid::new_v4(),
        title: title.to_owned(),
        description: Some(format!("{title} saudável")),
        ingredients: ingredients.iter().map(|s| (*s).to_owned()).collect(),
        instructions: vec!["Misture tudo.".to_owned()],
        prep_time: Some(10),
        cook_time: Some(15),
        servings: Some(2),
        calories_per_serving: Some(300),
        goal_category: Some(goal.to_owned()),
        diet_type: diet.map(ToOwned::to_owned),
        difficulty: Some("easy".to_owned()),
        image_url: None,
        nutritional_info: None,
        created_at: now,
        updated_at: now,
    };

    let recipes = vec![
        make(
            "Salada de Quinoa",
            "lose_weight",
            Some("vegetarian"),
            &["quinoa", "tomate"],
        ),
        make(
            "Frango Grelhado",
            "gain_muscle",
            None,
            &["frango", "azeite"],
        ),
    ];
    for recipe in &recipes {
        resources.database.insert_recipe(recipe).await.unwrap();
    }
    recipes
}

// ============================================================================
// Exercises
// ============================================================================

#[tokio::test]
async fn test_exercise_list_is_ordered_and_requires_auth() {
    let resources = create_test_resources(ScriptedLlmProvider::replying("oi")).await;
    let (_, auth) = create_test_user(&resources).await;
    seed_exercises(&resources).await;
    let router = ExerciseRoutes::routes(resources.clone());

    let (status, _) = send_request(router.clone(), Method::GET, "/api/exercises", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) =
        send_request(router, Method::GET, "/api/exercises", Some(&auth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);

    let titles: Vec<&str> = body["exercises"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Agachamento Livre", "Prancha", "Supino Reto"]);
}

#[tokio::test]
async fn test_exercise_filter_matches_muscle_group_substring() {
    let resources = create_test_resources(ScriptedLlmProvider::replying("oi")).await;
    let (_, auth) = create_test_user(&resources).await;
    seed_exercises(&resources).await;
    let router = ExerciseRoutes::routes(resources.clone());

    // Case-insensitive substring against the muscle_groups array
    let (status, body) = send_request(
        router.clone(),
        Method::GET,
        "/api/exercises?q=gl%C3%BAt",
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["exercises"][0]["title"], "Agachamento Livre");

    // Empty result sets render fine
    let (status, body) = send_request(
        router.clone(),
        Method::GET,
        "/api/exercises?q=natacao",
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["exercises"].as_array().unwrap().len(), 0);

    // Category equality filters compose with the search term
    let (status, body) = send_request(
        router,
        Method::GET,
        "/api/exercises?module=home&difficulty=beginner",
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn test_get_exercise_by_id() {
    let resources = create_test_resources(ScriptedLlmProvider::replying("oi")).await;
    let (_, auth) = create_test_user(&resources).await;
    let seeded = seed_exercises(&resources).await;
    let router = ExerciseRoutes::routes(resources.clone());

    let (status, body) = send_request(
        router.clone(),
        Method::GET,
        &format!("/api/exercises/{}", seeded[0].id),
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Agachamento Livre");
    assert_eq!(body["module_type"], "home");

    let (status, _) = send_request(
        router,
        Method::GET,
        &format!("/api/exercises/{}", Uuid::new_v4()),
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Recipes
// ============================================================================

#[tokio::test]
async fn test_recipe_filters_match_ingredients_and_categories() {
    let resources = create_test_resources(ScriptedLlmProvider::replying("oi")).await;
    let (_, auth) = create_test_user(&resources).await;
    let seeded = seed_recipes(&resources).await;
    let router = RecipeRoutes::routes(resources.clone());

    // Ingredient substring, case-insensitive
    let (status, body) = send_request(
        router.clone(),
        Method::GET,
        "/api/recipes?q=TOMATE",
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["recipes"][0]["title"], "Salada de Quinoa");

    // `all` means no filter; a concrete category narrows
    let (status, body) = send_request(
        router.clone(),
        Method::GET,
        "/api/recipes?goal=all&diet=vegetarian",
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);

    let (status, body) = send_request(
        router.clone(),
        Method::GET,
        "/api/recipes?goal=gain_muscle&diet=vegetarian",
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);

    let (status, body) = send_request(
        router,
        Method::GET,
        &format!("/api/recipes/{}", seeded[1].id),
        Some(&auth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Frango Grelhado");
}
