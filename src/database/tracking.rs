// ABOUTME: Progress tracker storage operations
// ABOUTME: Workouts, weekly goals, achievements, measurements, meal plans, subscribers
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::users::{parse_date, parse_timestamp, parse_uuid};
use super::{db_err, json_string_list, to_json_text, Database};
use crate::errors::AppResult;
use crate::models::{Achievement, MealPlan, ProgressEntry, Subscriber, UserGoal, Workout};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use sqlx::Row;
use uuid::Uuid;

/// Payload for logging a workout
#[derive(Debug, Clone, Deserialize)]
pub struct NewWorkout {
    /// Library exercise performed, if any
    pub exercise_id: Option<Uuid>,
    /// Date the workout is planned for
    pub scheduled_date: Option<NaiveDate>,
    /// Free-form notes
    pub notes: Option<String>,
}

/// Payload for completing a workout
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkoutCompletion {
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
}

/// Payload for creating a weekly goal
#[derive(Debug, Clone, Deserialize)]
pub struct NewUserGoal {
    /// Goal category (`workouts`, `diet`, `water`, ...)
    pub goal_type: String,
    /// Target value for the week
    pub target_value: Option<f64>,
    /// First day (Sunday) of the tracked week
    pub week_start: NaiveDate,
}

/// Payload for recording a measurement entry
#[derive(Debug, Clone, Deserialize)]
pub struct NewProgressEntry {
    /// Date of the measurement
    pub measurement_date: NaiveDate,
    /// Weight in kilograms
    pub weight: Option<f64>,
    /// Body fat percentage
    pub body_fat_percentage: Option<f64>,
    /// Muscle mass in kilograms
    pub muscle_mass: Option<f64>,
    /// Free-form tape measurements
    pub measurements: Option<serde_json::Value>,
    /// Progress photo URLs
    #[serde(default)]
    pub photos: Vec<String>,
    /// Free-form notes
    pub notes: Option<String>,
}

/// Payload for planning a meal
#[derive(Debug, Clone, Deserialize)]
pub struct NewMealPlan {
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
    /// Free-form notes
    pub notes: Option<String>,
}

impl Database {
    /// Create the tracker tables
    pub(super) async fn migrate_tracking(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                exercise_id TEXT REFERENCES exercises(id),
                scheduled_date TEXT,
                completed_date TEXT,
                duration_minutes INTEGER,
                calories_burned INTEGER,
                sets_completed INTEGER,
                reps_completed INTEGER,
                difficulty_rating INTEGER,
                notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to create workouts table"))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS achievements (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                achievement_type TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT,
                icon_name TEXT,
                points INTEGER,
                unlocked_at TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to create achievements table"))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_goals (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                goal_type TEXT NOT NULL,
                target_value REAL,
                current_value REAL,
                completed BOOLEAN NOT NULL DEFAULT 0,
                completed_at TEXT,
                week_start TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to create user_goals table"))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS progress (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                measurement_date TEXT NOT NULL,
                weight REAL,
                body_fat_percentage REAL,
                muscle_mass REAL,
                measurements TEXT,
                photos TEXT,
                notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to create progress table"))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS meal_plans (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                recipe_id TEXT REFERENCES recipes(id),
                date TEXT NOT NULL,
                meal_type TEXT NOT NULL,
                custom_meal TEXT,
                calories INTEGER,
                completed BOOLEAN NOT NULL DEFAULT 0,
                notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to create meal_plans table"))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS subscribers (
                id TEXT PRIMARY KEY,
                user_id TEXT,
                email TEXT UNIQUE NOT NULL,
                subscribed BOOLEAN NOT NULL DEFAULT 1,
                subscription_tier TEXT,
                subscription_end TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to create subscribers table"))?;

        Ok(())
    }

    // ========================================================================
    // Workouts
    // ========================================================================

    /// Log a workout for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_workout(&self, user_id: Uuid, new: &NewWorkout) -> AppResult<Workout> {
        let now = Utc::now();
        let workout = Workout {
            id: Uuid::new_v4(),
            user_id,
            exercise_id: new.exercise_id,
            scheduled_date: new.scheduled_date,
            completed_date: None,
            duration_minutes: None,
            calories_burned: None,
            sets_completed: None,
            reps_completed: None,
            difficulty_rating: None,
            notes: new.notes.clone(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r"
            INSERT INTO workouts (id, user_id, exercise_id, scheduled_date, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            ",
        )
        .bind(workout.id.to_string())
        .bind(user_id.to_string())
        .bind(new.exercise_id.map(|id| id.to_string()))
        .bind(new.scheduled_date.map(|d| d.to_string()))
        .bind(&new.notes)
        .bind(now.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to create workout"))?;

        Ok(workout)
    }

    /// List a user's workouts, most recently created first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt
    pub async fn list_workouts(&self, user_id: Uuid) -> AppResult<Vec<Workout>> {
        let rows = sqlx::query(
            r"
            SELECT * FROM workouts
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(self.pool())
        .await
        .map_err(db_err("Failed to list workouts"))?;

        rows.into_iter().map(row_to_workout).collect()
    }

    /// Mark a workout as completed today with the session results
    ///
    /// Returns whether a row owned by the user was updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn complete_workout(
        &self,
        workout_id: Uuid,
        user_id: Uuid,
        completion: &WorkoutCompletion,
    ) -> AppResult<bool> {
        let now = Utc::now();
        let result = sqlx::query(
            r"
            UPDATE workouts SET
                completed_date = $3,
                duration_minutes = $4,
                calories_burned = $5,
                sets_completed = $6,
                reps_completed = $7,
                difficulty_rating = $8,
                updated_at = $9
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(workout_id.to_string())
        .bind(user_id.to_string())
        .bind(now.date_naive().to_string())
        .bind(completion.duration_minutes)
        .bind(completion.calories_burned)
        .bind(completion.sets_completed)
        .bind(completion.reps_completed)
        .bind(completion.difficulty_rating)
        .bind(now.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to complete workout"))?;

        Ok(result.rows_affected() > 0)
    }

    // ========================================================================
    // Weekly goals
    // ========================================================================

    /// Create a weekly goal
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_goal(&self, user_id: Uuid, new: &NewUserGoal) -> AppResult<UserGoal> {
        let now = Utc::now();
        let goal = UserGoal {
            id: Uuid::new_v4(),
            user_id,
            goal_type: new.goal_type.clone(),
            target_value: new.target_value,
            current_value: Some(0.0),
            completed: false,
            completed_at: None,
            week_start: new.week_start,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r"
            INSERT INTO user_goals (id, user_id, goal_type, target_value, current_value, completed, week_start, created_at, updated_at)
            VALUES ($1, $2, $3, $4, 0, 0, $5, $6, $6)
            ",
        )
        .bind(goal.id.to_string())
        .bind(user_id.to_string())
        .bind(&new.goal_type)
        .bind(new.target_value)
        .bind(new.week_start.to_string())
        .bind(now.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to create goal"))?;

        Ok(goal)
    }

    /// List a user's goals with `week_start` on or after the given date
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt
    pub async fn list_goals_since(
        &self,
        user_id: Uuid,
        week_start: NaiveDate,
    ) -> AppResult<Vec<UserGoal>> {
        let rows = sqlx::query(
            r"
            SELECT * FROM user_goals
            WHERE user_id = $1 AND week_start >= $2
            ORDER BY created_at ASC
            ",
        )
        .bind(user_id.to_string())
        .bind(week_start.to_string())
        .fetch_all(self.pool())
        .await
        .map_err(db_err("Failed to list goals"))?;

        rows.into_iter().map(row_to_goal).collect()
    }

    /// Update progress on a goal, auto-completing when the target is reached
    ///
    /// Returns the updated goal, or `None` when the user owns no such goal.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_goal_progress(
        &self,
        goal_id: Uuid,
        user_id: Uuid,
        current_value: f64,
    ) -> AppResult<Option<UserGoal>> {
        let now = Utc::now();

        let row = sqlx::query("SELECT target_value FROM user_goals WHERE id = $1 AND user_id = $2")
            .bind(goal_id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(self.pool())
            .await
            .map_err(db_err("Failed to load goal"))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let target: Option<f64> = row.get("target_value");
        let completed = target.is_some_and(|t| t > 0.0 && current_value >= t);

        sqlx::query(
            r"
            UPDATE user_goals SET
                current_value = $3,
                completed = $4,
                completed_at = CASE WHEN $4 THEN $5 ELSE completed_at END,
                updated_at = $5
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(goal_id.to_string())
        .bind(user_id.to_string())
        .bind(current_value)
        .bind(completed)
        .bind(now.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to update goal progress"))?;

        let row = sqlx::query("SELECT * FROM user_goals WHERE id = $1")
            .bind(goal_id.to_string())
            .fetch_one(self.pool())
            .await
            .map_err(db_err("Failed to reload goal"))?;

        row_to_goal(row).map(Some)
    }

    // ========================================================================
    // Achievements
    // ========================================================================

    /// Record an unlocked achievement
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_achievement(&self, achievement: &Achievement) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO achievements (id, user_id, achievement_type, title, description, icon_name, points, unlocked_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(achievement.id.to_string())
        .bind(achievement.user_id.to_string())
        .bind(&achievement.achievement_type)
        .bind(&achievement.title)
        .bind(&achievement.description)
        .bind(&achievement.icon_name)
        .bind(achievement.points)
        .bind(achievement.unlocked_at.to_rfc3339())
        .bind(achievement.created_at.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to insert achievement"))?;

        Ok(())
    }

    /// List a user's most recently unlocked achievements
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt
    pub async fn list_recent_achievements(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<Achievement>> {
        let rows = sqlx::query(
            r"
            SELECT * FROM achievements
            WHERE user_id = $1
            ORDER BY unlocked_at DESC
            LIMIT $2
            ",
        )
        .bind(user_id.to_string())
        .bind(limit)
        .fetch_all(self.pool())
        .await
        .map_err(db_err("Failed to list achievements"))?;

        rows.into_iter().map(row_to_achievement).collect()
    }

    // ========================================================================
    // Progress entries
    // ========================================================================

    /// Record a measurement entry
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_progress_entry(
        &self,
        user_id: Uuid,
        new: &NewProgressEntry,
    ) -> AppResult<ProgressEntry> {
        let now = Utc::now();
        let entry = ProgressEntry {
            id: Uuid::new_v4(),
            user_id,
            measurement_date: new.measurement_date,
            weight: new.weight,
            body_fat_percentage: new.body_fat_percentage,
            muscle_mass: new.muscle_mass,
            measurements: new.measurements.clone(),
            photos: new.photos.clone(),
            notes: new.notes.clone(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r"
            INSERT INTO progress (id, user_id, measurement_date, weight, body_fat_percentage, muscle_mass, measurements, photos, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            ",
        )
        .bind(entry.id.to_string())
        .bind(user_id.to_string())
        .bind(new.measurement_date.to_string())
        .bind(new.weight)
        .bind(new.body_fat_percentage)
        .bind(new.muscle_mass)
        .bind(new.measurements.as_ref().map(ToString::to_string))
        .bind(to_json_text(&new.photos))
        .bind(&new.notes)
        .bind(now.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to create progress entry"))?;

        Ok(entry)
    }

    /// List a user's measurement entries, most recent first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt
    pub async fn list_progress_entries(&self, user_id: Uuid) -> AppResult<Vec<ProgressEntry>> {
        let rows = sqlx::query(
            r"
            SELECT * FROM progress
            WHERE user_id = $1
            ORDER BY measurement_date DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(self.pool())
        .await
        .map_err(db_err("Failed to list progress entries"))?;

        rows.into_iter().map(row_to_progress).collect()
    }

    // ========================================================================
    // Meal plans
    // ========================================================================

    /// Plan a meal for a day
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_meal_plan(&self, user_id: Uuid, new: &NewMealPlan) -> AppResult<MealPlan> {
        let now = Utc::now();
        let plan = MealPlan {
            id: Uuid::new_v4(),
            user_id,
            recipe_id: new.recipe_id,
            date: new.date,
            meal_type: new.meal_type.clone(),
            custom_meal: new.custom_meal.clone(),
            calories: new.calories,
            completed: false,
            notes: new.notes.clone(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r"
            INSERT INTO meal_plans (id, user_id, recipe_id, date, meal_type, custom_meal, calories, completed, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 0, $8, $9, $9)
            ",
        )
        .bind(plan.id.to_string())
        .bind(user_id.to_string())
        .bind(new.recipe_id.map(|id| id.to_string()))
        .bind(new.date.to_string())
        .bind(&new.meal_type)
        .bind(&new.custom_meal)
        .bind(new.calories)
        .bind(&new.notes)
        .bind(now.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to create meal plan"))?;

        Ok(plan)
    }

    /// List a user's meals planned for a day
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is corrupt
    pub async fn list_meal_plans(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Vec<MealPlan>> {
        let rows = sqlx::query(
            r"
            SELECT * FROM meal_plans
            WHERE user_id = $1 AND date = $2
            ORDER BY created_at ASC
            ",
        )
        .bind(user_id.to_string())
        .bind(date.to_string())
        .fetch_all(self.pool())
        .await
        .map_err(db_err("Failed to list meal plans"))?;

        rows.into_iter().map(row_to_meal_plan).collect()
    }

    /// Mark a planned meal as eaten
    ///
    /// Returns whether a row owned by the user was updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn complete_meal_plan(&self, plan_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE meal_plans SET completed = 1, updated_at = $3
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(plan_id.to_string())
        .bind(user_id.to_string())
        .bind(Utc::now().to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to complete meal plan"))?;

        Ok(result.rows_affected() > 0)
    }

    // ========================================================================
    // Subscribers
    // ========================================================================

    /// Subscribe an email address, reactivating it when already present
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails
    pub async fn upsert_subscriber(
        &self,
        email: &str,
        user_id: Option<Uuid>,
    ) -> AppResult<Subscriber> {
        let now = Utc::now();
        let id = Uuid::new_v4();

        sqlx::query(
            r"
            INSERT INTO subscribers (id, user_id, email, subscribed, created_at, updated_at)
            VALUES ($1, $2, $3, 1, $4, $4)
            ON CONFLICT(email) DO UPDATE SET subscribed = 1, updated_at = $4
            ",
        )
        .bind(id.to_string())
        .bind(user_id.map(|u| u.to_string()))
        .bind(email)
        .bind(now.to_rfc3339())
        .execute(self.pool())
        .await
        .map_err(db_err("Failed to upsert subscriber"))?;

        let row = sqlx::query("SELECT * FROM subscribers WHERE email = $1")
            .bind(email)
            .fetch_one(self.pool())
            .await
            .map_err(db_err("Failed to reload subscriber"))?;

        row_to_subscriber(row)
    }
}

fn row_to_workout(row: sqlx::sqlite::SqliteRow) -> AppResult<Workout> {
    Ok(Workout {
        id: parse_uuid(&row.get::<String, _>("id"))?,
        user_id: parse_uuid(&row.get::<String, _>("user_id"))?,
        exercise_id: row
            .get::<Option<String>, _>("exercise_id")
            .map(|s| parse_uuid(&s))
            .transpose()?,
        scheduled_date: row
            .get::<Option<String>, _>("scheduled_date")
            .map(|s| parse_date(&s))
            .transpose()?,
        completed_date: row
            .get::<Option<String>, _>("completed_date")
            .map(|s| parse_date(&s))
            .transpose()?,
        duration_minutes: row.get("duration_minutes"),
        calories_burned: row.get("calories_burned"),
        sets_completed: row.get("sets_completed"),
        reps_completed: row.get("reps_completed"),
        difficulty_rating: row.get("difficulty_rating"),
        notes: row.get("notes"),
        created_at: parse_timestamp(&row.get::<String, _>("created_at"))?,
        updated_at: parse_timestamp(&row.get::<String, _>("updated_at"))?,
    })
}

fn row_to_goal(row: sqlx::sqlite::SqliteRow) -> AppResult<UserGoal> {
    Ok(UserGoal {
        id: parse_uuid(&row.get::<String, _>("id"))?,
        user_id: parse_uuid(&row.get::<String, _>("user_id"))?,
        goal_type: row.get("goal_type"),
        target_value: row.get("target_value"),
        current_value: row.get("current_value"),
        completed: row.get("completed"),
        completed_at: row
            .get::<Option<String>, _>("completed_at")
            .map(|s| parse_timestamp(&s))
            .transpose()?,
        week_start: parse_date(&row.get::<String, _>("week_start"))?,
        created_at: parse_timestamp(&row.get::<String, _>("created_at"))?,
        updated_at: parse_timestamp(&row.get::<String, _>("updated_at"))?,
    })
}

fn row_to_achievement(row: sqlx::sqlite::SqliteRow) -> AppResult<Achievement> {
    Ok(Achievement {
        id: parse_uuid(&row.get::<String, _>("id"))?,
        user_id: parse_uuid(&row.get::<String, _>("user_id"))?,
        achievement_type: row.get("achievement_type"),
        title: row.get("title"),
        description: row.get("description"),
        icon_name: row.get("icon_name"),
        points: row.get("points"),
        unlocked_at: parse_timestamp(&row.get::<String, _>("unlocked_at"))?,
        created_at: parse_timestamp(&row.get::<String, _>("created_at"))?,
    })
}

fn row_to_progress(row: sqlx::sqlite::SqliteRow) -> AppResult<ProgressEntry> {
    Ok(ProgressEntry {
        id: parse_uuid(&row.get::<String, _>("id"))?,
        user_id: parse_uuid(&row.get::<String, _>("user_id"))?,
        measurement_date: parse_date(&row.get::<String, _>("measurement_date"))?,
        weight: row.get("weight"),
        body_fat_percentage: row.get("body_fat_percentage"),
        muscle_mass: row.get("muscle_mass"),
        measurements: row
            .get::<Option<String>, _>("measurements")
            .and_then(|s| serde_json::from_str(&s).ok()),
        photos: json_string_list(row.get("photos")),
        notes: row.get("notes"),
        created_at: parse_timestamp(&row.get::<String, _>("created_at"))?,
        updated_at: parse_timestamp(&row.get::<String, _>("updated_at"))?,
    })
}

fn row_to_meal_plan(row: sqlx::sqlite::SqliteRow) -> AppResult<MealPlan> {
    Ok(MealPlan {
        id: parse_uuid(&row.get::<String, _>("id"))?,
        user_id: parse_uuid(&row.get::<String, _>("user_id"))?,
        recipe_id: row
            .get::<Option<String>, _>("recipe_id")
            .map(|s| parse_uuid(&s))
            .transpose()?,
        date: parse_date(&row.get::<String, _>("date"))?,
        meal_type: row.get("meal_type"),
        custom_meal: row.get("custom_meal"),
        calories: row.get("calories"),
        completed: row.get("completed"),
        notes: row.get("notes"),
        created_at: parse_timestamp(&row.get::<String, _>("created_at"))?,
        updated_at: parse_timestamp(&row.get::<String, _>("updated_at"))?,
    })
}

fn row_to_subscriber(row: sqlx::sqlite::SqliteRow) -> AppResult<Subscriber> {
    Ok(Subscriber {
        id: parse_uuid(&row.get::<String, _>("id"))?,
        user_id: row
            .get::<Option<String>, _>("user_id")
            .map(|s| parse_uuid(&s))
            .transpose()?,
        email: row.get("email"),
        subscribed: row.get("subscribed"),
        subscription_tier: row.get("subscription_tier"),
        subscription_end: row
            .get::<Option<String>, _>("subscription_end")
            .map(|s| parse_timestamp(&s))
            .transpose()?,
        created_at: parse_timestamp(&row.get::<String, _>("created_at"))?,
        updated_at: parse_timestamp(&row.get::<String, _>("updated_at"))?,
    })
}
