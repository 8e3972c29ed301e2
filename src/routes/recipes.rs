// ABOUTME: Recipe library route handlers
// ABOUTME: Full-table list with substring/category filtering, plus single reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recipe library routes
//!
//! Mirrors the exercise list pattern: full-table fetch ordered by title, then
//! a pure filter matching the search term against title, description or any
//! ingredient, with equality filters on goal category and diet type.

use crate::{
    errors::AppError, models::Recipe, routes::authenticate, server::ServerResources,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Query parameters for the recipe list
#[derive(Debug, Default, Deserialize)]
pub struct RecipeListQuery {
    /// Search term matched against title, description and ingredients
    #[serde(default)]
    pub q: Option<String>,
    /// Goal category filter (`lose_weight`, `gain_muscle`, ...)
    #[serde(default)]
    pub goal: Option<String>,
    /// Diet type filter (`vegetarian`, `vegan`, ...)
    #[serde(default)]
    pub diet: Option<String>,
}

/// Response body for the recipe list
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeListResponse {
    /// Matching recipes, ordered by title
    pub recipes: Vec<Recipe>,
    /// Number of matches
    pub total: usize,
}

/// Recipe route handlers
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes", get(Self::list_recipes))
            .route("/api/recipes/:recipe_id", get(Self::get_recipe))
            .with_state(resources)
    }

    /// List the recipe library with optional filters
    async fn list_recipes(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
        Query(query): Query<RecipeListQuery>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;

        let all = resources.database.list_recipes().await?;
        let recipes = filter_recipes(
            all,
            query.q.as_deref(),
            normalize_category(query.goal.as_deref()),
            normalize_category(query.diet.as_deref()),
        );

        let total = recipes.len();
        Ok((StatusCode::OK, Json(RecipeListResponse { recipes, total })).into_response())
    }

    /// Get a single recipe by id
    async fn get_recipe(
        State(resources): State<Arc<ServerResources>>,
        headers: axum::http::HeaderMap,
        Path(recipe_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;

        let recipe = resources
            .database
            .get_recipe(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe"))?;

        Ok((StatusCode::OK, Json(recipe)).into_response())
    }
}

/// `all` and blank both mean "no filter"
fn normalize_category(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty() && *s != "all")
}

/// Filter recipes the way the nutrition page does: case-insensitive substring
/// match of the search term against title, description or any ingredient,
/// and equality on goal category / diet type when selected.
#[must_use]
pub fn filter_recipes(
    recipes: Vec<Recipe>,
    search: Option<&str>,
    goal: Option<&str>,
    diet: Option<&str>,
) -> Vec<Recipe> {
    let needle = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    recipes
        .into_iter()
        .filter(|recipe| {
            if let Some(ref needle) = needle {
                let title_match = recipe.title.to_lowercase().contains(needle);
                let description_match = recipe
                    .description
                    .as_ref()
                    .is_some_and(|d| d.to_lowercase().contains(needle));
                let ingredient_match = recipe
                    .ingredients
                    .iter()
                    .any(|ingredient| ingredient.to_lowercase().contains(needle));
                if !title_match && !description_match && !ingredient_match {
                    return false;
                }
            }
            if let Some(goal) = goal {
                if recipe.goal_category.as_deref() != Some(goal) {
                    return false;
                }
            }
            if let Some(diet) = diet {
                if recipe.diet_type.as_deref() != Some(diet) {
                    return false;
                }
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn recipe(title: &str, goal: Option<&str>, diet: Option<&str>, ingredients: &[&str]) -> Recipe {
        let now = Utc::now();
        Recipe {
            id: Uuid::new_v4(),
            title: title.to_owned(),
            description: Some(format!("{title} saudável e prática")),
            ingredients: ingredients.iter().map(|s| (*s).to_owned()).collect(),
            instructions: Vec::new(),
            prep_time: Some(10),
            cook_time: Some(20),
            servings: Some(2),
            calories_per_serving: Some(350),
            goal_category: goal.map(ToOwned::to_owned),
            diet_type: diet.map(ToOwned::to_owned),
            difficulty: Some("easy".to_owned()),
            image_url: None,
            nutritional_info: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_library() -> Vec<Recipe> {
        vec![
            recipe(
                "Salada de Quinoa",
                Some("lose_weight"),
                Some("vegetarian"),
                &["quinoa", "tomate", "pepino"],
            ),
            recipe(
                "Frango Grelhado",
                Some("gain_muscle"),
                None,
                &["frango", "azeite", "alho"],
            ),
        ]
    }

    #[test]
    fn test_filter_by_ingredient_substring() {
        let result = filter_recipes(sample_library(), Some("TOMATE"), None, None);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Salada de Quinoa");
    }

    #[test]
    fn test_filter_by_goal_and_diet() {
        let result = filter_recipes(sample_library(), None, Some("gain_muscle"), None);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Frango Grelhado");

        let none = filter_recipes(sample_library(), None, Some("gain_muscle"), Some("vegan"));
        assert!(none.is_empty());
    }

    #[test]
    fn test_all_category_means_no_filter() {
        assert_eq!(normalize_category(Some("all")), None);
        assert_eq!(normalize_category(Some("")), None);
        assert_eq!(normalize_category(Some("vegan")), Some("vegan"));
    }
}
