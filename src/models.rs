// ABOUTME: Core data models for the Meu Ritmo wellness API
// ABOUTME: Defines User, Profile, Exercise, Recipe, ChatMessage and tracking records
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Data Models
//!
//! Core data structures used throughout the Meu Ritmo server. Entities are
//! flat records owned by a user or global reference data; the only derived
//! value of note is the BMI computed from a profile's weight and height.
//!
//! ## Design Principles
//!
//! - **Serializable**: all models support JSON serialization for the REST API
//! - **Type Safe**: category fields use enums instead of free-form strings
//! - **Immutable chat**: chat messages have no update path after creation

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Users & Profiles
// ============================================================================

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// User email address (used for identification)
    pub email: String,
    /// Display name
    pub display_name: Option<String>,
    /// Hashed password for authentication
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether the user account is active
    pub is_active: bool,
    /// When the user account was created
    pub created_at: DateTime<Utc>,
    /// Last time the user accessed the system
    pub last_active: DateTime<Utc>,
}

impl User {
    /// Create a new active user with a fresh id
    #[must_use]
    pub fn new(email: String, password_hash: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            password_hash,
            is_active: true,
            created_at: now,
            last_active: now,
        }
    }
}

/// User wellness profile, editable from the settings page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Unique profile identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Full name shown in greetings
    pub full_name: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Age in years
    pub age: Option<i64>,
    /// Height in centimeters
    pub height: Option<f64>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    /// Primary goal (free-form: lose weight, gain muscle, ...)
    pub goal: Option<String>,
    /// Self-reported fitness level
    pub fitness_level: Option<String>,
    /// Dietary preference
    pub diet_preference: Option<String>,
    /// Avatar image URL
    pub avatar_url: Option<String>,
    /// When the profile was created
    pub created_at: DateTime<Utc>,
    /// When the profile was last updated
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Body mass index `weight / (height/100)^2`, rounded to one decimal.
    ///
    /// Returns `None` when either input is absent or non-positive.
    #[must_use]
    pub fn bmi(&self) -> Option<f64> {
        let weight = self.weight?;
        let height = self.height?;
        if weight <= 0.0 || height <= 0.0 {
            return None;
        }
        let meters = height / 100.0;
        Some(((weight / (meters * meters)) * 10.0).round() / 10.0)
    }

    /// BMI formatted for display, `"--"` when it cannot be computed
    #[must_use]
    pub fn bmi_display(&self) -> String {
        self.bmi()
            .map_or_else(|| "--".to_owned(), |bmi| format!("{bmi:.1}"))
    }
}

// ============================================================================
// Exercise Catalog
// ============================================================================

/// Exercise module: where the workout is meant to be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    /// Home workouts, minimal equipment
    Home,
    /// Gym / advanced workouts
    Advanced,
}

impl ModuleType {
    /// String representation used in storage and query parameters
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Advanced => "advanced",
        }
    }

    /// Parse from storage representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "home" => Some(Self::Home),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

/// Exercise difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    /// String representation used in storage and query parameters
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parse from storage representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

/// Exercise from the global workout library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique exercise identifier
    pub id: Uuid,
    /// Exercise title
    pub title: String,
    /// Short description
    pub description: Option<String>,
    /// Step-by-step instructions
    pub instructions: Option<String>,
    /// Benefits of performing the exercise
    pub benefits: Option<String>,
    /// Medical contraindications
    pub contraindications: Option<String>,
    /// Free-form coach observations
    pub observations: Option<String>,
    /// Module the exercise belongs to
    pub module_type: ModuleType,
    /// Difficulty level
    pub difficulty_level: DifficultyLevel,
    /// Duration in minutes
    pub duration: Option<i64>,
    /// Estimated calories burned
    pub calories_burned: Option<i64>,
    /// Demonstration video URL
    pub youtube_url: Option<String>,
    /// Illustration image URLs
    pub image_urls: Vec<String>,
    /// Muscle groups worked
    pub muscle_groups: Vec<String>,
    /// Equipment needed (empty means bodyweight only)
    pub equipment_needed: Vec<String>,
    /// When the exercise was created
    pub created_at: DateTime<Utc>,
    /// When the exercise was last updated
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Recipe Catalog
// ============================================================================

/// Recipe from the global nutrition library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique recipe identifier
    pub id: Uuid,
    /// Recipe title
    pub title: String,
    /// Short description
    pub description: Option<String>,
    /// Ingredient list
    pub ingredients: Vec<String>,
    /// Preparation steps
    pub instructions: Vec<String>,
    /// Preparation time in minutes
    pub prep_time: Option<i64>,
    /// Cooking time in minutes
    pub cook_time: Option<i64>,
    /// Number of servings
    pub servings: Option<i64>,
    /// Calories per serving
    pub calories_per_serving: Option<i64>,
    /// Goal the recipe supports (`lose_weight`, `gain_muscle`, ...)
    pub goal_category: Option<String>,
    /// Diet type (`vegetarian`, `vegan`, `low_carb`, ...)
    pub diet_type: Option<String>,
    /// Difficulty (`easy`, `medium`, `hard`)
    pub difficulty: Option<String>,
    /// Cover image URL
    pub image_url: Option<String>,
    /// Nutritional breakdown (free-form JSON)
    pub nutritional_info: Option<serde_json::Value>,
    /// When the recipe was created
    pub created_at: DateTime<Utc>,
    /// When the recipe was last updated
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Chat
// ============================================================================

/// Author of a stored chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Message typed by the user
    User,
    /// Reply authored by the AI coach
    Ai,
}

impl MessageType {
    /// String representation used in storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Ai => "ai",
        }
    }

    /// Parse from storage representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "ai" => Some(Self::Ai),
            _ => None,
        }
    }
}

/// Stored chat message. Immutable after creation; one row per side of every
/// conversation turn, ordered by `created_at` ascending for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Who authored the message
    pub message_type: MessageType,
    /// Message text
    pub content: String,
    /// Attached image URLs, when the user sent a photo
    pub image_urls: Option<Vec<String>>,
    /// Free-form context payload
    pub context_data: Option<serde_json::Value>,
    /// When the message was created
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Tracking
// ============================================================================

/// Logged or scheduled workout session, optionally tied to a library exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Unique workout identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Library exercise performed, if any
    pub exercise_id: Option<Uuid>,
    /// Date the workout is planned for
    pub scheduled_date: Option<NaiveDate>,
    /// Date the workout was completed
    pub completed_date: Option<NaiveDate>,
    /// Session duration in minutes
    pub duration_minutes: Option<i64>,
    /// Calories burned
    pub calories_burned: Option<i64>,
    /// Sets completed
    pub sets_completed: Option<i64>,
    /// Reps completed
    pub reps_completed: Option<i64>,
    /// Perceived difficulty, 1-5
    pub difficulty_rating: Option<i64>,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the row was created
    pub created_at: DateTime<Utc>,
    /// When the row was last updated
    pub updated_at: DateTime<Utc>,
}

/// Unlocked achievement shown on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    /// Unique achievement identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Achievement category (`streak`, `milestone`, ...)
    pub achievement_type: String,
    /// Title
    pub title: String,
    /// Description
    pub description: Option<String>,
    /// Icon identifier for the client
    pub icon_name: Option<String>,
    /// Points awarded
    pub points: Option<i64>,
    /// When the achievement was unlocked
    pub unlocked_at: DateTime<Utc>,
    /// When the row was created
    pub created_at: DateTime<Utc>,
}

/// Weekly goal tracked on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserGoal {
    /// Unique goal identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Goal category (`workouts`, `diet`, `water`, ...)
    pub goal_type: String,
    /// Target value for the week
    pub target_value: Option<f64>,
    /// Current accumulated value
    pub current_value: Option<f64>,
    /// Whether the goal has been reached
    pub completed: bool,
    /// When the goal was completed
    pub completed_at: Option<DateTime<Utc>>,
    /// First day (Sunday) of the tracked week
    pub week_start: NaiveDate,
    /// When the row was created
    pub created_at: DateTime<Utc>,
    /// When the row was last updated
    pub updated_at: DateTime<Utc>,
}

impl UserGoal {
    /// Progress towards the target as a percentage, capped at 100.
    ///
    /// A missing or non-positive target reports 0 rather than dividing.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        let target = self.target_value.unwrap_or(0.0);
        if target <= 0.0 {
            return 0.0;
        }
        let current = self.current_value.unwrap_or(0.0);
        ((current / target) * 100.0).min(100.0)
    }
}

/// Body measurement entry from the progress tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEntry {
    /// Unique entry identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Date of the measurement
    pub measurement_date: NaiveDate,
    /// Weight in kilograms
    pub weight: Option<f64>,
    /// Body fat percentage
    pub body_fat_percentage: Option<f64>,
    /// Muscle mass in kilograms
    pub muscle_mass: Option<f64>,
    /// Free-form tape measurements (waist, chest, ...)
    pub measurements: Option<serde_json::Value>,
    /// Progress photo URLs
    pub photos: Vec<String>,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the row was created
    pub created_at: DateTime<Utc>,
    /// When the row was last updated
    pub updated_at: DateTime<Utc>,
}

/// Planned meal for a given day, optionally tied to a library recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlan {
    /// Unique meal plan identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Library recipe, if any
    pub recipe_id: Option<Uuid>,
    /// Day the meal is planned for
    pub date: NaiveDate,
    /// Meal slot (`breakfast`, `lunch`, `dinner`, `snack`)
    pub meal_type: String,
    /// Custom meal description when no recipe is linked
    pub custom_meal: Option<String>,
    /// Calories for the meal
    pub calories: Option<i64>,
    /// Whether the meal was eaten
    pub completed: bool,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the row was created
    pub created_at: DateTime<Utc>,
    /// When the row was last updated
    pub updated_at: DateTime<Utc>,
}

/// Newsletter / plan subscriber captured from the marketing site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    /// Unique subscriber identifier
    pub id: Uuid,
    /// Linked user account, if any
    pub user_id: Option<Uuid>,
    /// Subscriber email
    pub email: String,
    /// Whether the subscription is active
    pub subscribed: bool,
    /// Paid tier name, if any
    pub subscription_tier: Option<String>,
    /// Subscription end date
    pub subscription_end: Option<DateTime<Utc>>,
    /// When the row was created
    pub created_at: DateTime<Utc>,
    /// When the row was last updated
    pub updated_at: DateTime<Utc>,
}
