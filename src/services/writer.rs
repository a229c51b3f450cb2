// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Append-only writes of user posts and meal entries.
//!
//! Identifiers are per-user sequence numbers (`post3`, `meal12`) derived
//! from a fresh count on every call. Two concurrent appends for the same user
//! can compute the same id; the store's document id includes the user, so
//! the second insert is rejected instead of overwriting the first.

use crate::db::DashboardStore;
use crate::error::{AppError, Result};
use crate::models::{MealEntry, MealRow, NewMeal, NewPost, Post, PostRow, Workout};
use crate::services::normalize::{normalize_meal, normalize_post};
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, SubsecRound, Utc};
use serde::Serialize;
use validator::Validate;

const POST_ID_PREFIX: &str = "post";
const MEAL_ID_PREFIX: &str = "meal";

/// A record as stored by an append, with the instant it was written.
#[derive(Debug, Clone, Serialize)]
pub struct Created<T> {
    #[serde(flatten)]
    pub record: T,
    /// RFC 3339 UTC, second precision.
    pub written_at: String,
}

impl<T> Created<T> {
    fn new(record: T, written: DateTime<Utc>) -> Self {
        Self {
            record,
            written_at: format_utc_rfc3339(written),
        }
    }
}

/// Next sequence id for a user who already owns `existing` records.
pub fn next_sequence_id(prefix: &str, existing: usize) -> String {
    format!("{}{}", prefix, existing + 1)
}

/// Write instant at second precision.
fn write_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Turn the store's row-error list into a result.
fn check_insert(kind: &str, id: &str, errors: Vec<String>) -> Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    tracing::error!(kind, id, errors = ?errors, "Store rejected insert");
    Err(AppError::WriteRejected(errors))
}

/// Append a post for `author_id` and return it as stored.
pub async fn append_post<S: DashboardStore>(
    store: &S,
    author_id: &str,
    input: NewPost,
) -> Result<Created<Post>> {
    input.validate()?;

    let existing = store.posts_by_author(author_id).await?.len();
    let post_id = next_sequence_id(POST_ID_PREFIX, existing);
    let written = write_timestamp();

    let row = PostRow {
        post_id: Some(post_id.clone()),
        author_id: Some(author_id.to_string()),
        timestamp: Some(written),
        content: Some(input.content),
        image_url: input.image_url,
    };

    let errors = store.insert_post(&row).await?;
    check_insert("post", &post_id, errors)?;

    tracing::info!(author_id, post_id = %post_id, "Post created");
    Ok(Created::new(normalize_post(0, row)?, written))
}

/// Append a meal entry for `user_id` and return it as stored.
pub async fn append_meal<S: DashboardStore>(
    store: &S,
    user_id: &str,
    input: NewMeal,
) -> Result<Created<MealEntry>> {
    input.validate()?;

    let existing = store.meals_for_user(user_id).await?.len();
    let meal_id = next_sequence_id(MEAL_ID_PREFIX, existing);
    let written = write_timestamp();

    let row = MealRow {
        meal_id: Some(meal_id.clone()),
        user_id: Some(user_id.to_string()),
        meal_name: Some(input.meal_name),
        calories: Some(input.calories),
        protein: Some(input.protein),
        carbs: Some(input.carbs),
        fats: Some(input.fat),
        meal_date: Some(input.date),
        created_at: Some(written),
    };

    let errors = store.insert_meal(&row).await?;
    check_insert("meal", &meal_id, errors)?;

    tracing::info!(user_id, meal_id = %meal_id, "Meal logged");
    Ok(Created::new(normalize_meal(0, row)?, written))
}

/// What a share suggestion is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Achievement {
    Steps,
    Calories,
    Distance,
}

/// Suggested share text for a workout. Missing values read as zero.
pub fn achievement_text(kind: Achievement, workout: Option<&Workout>) -> String {
    match kind {
        Achievement::Steps => {
            let steps = workout.and_then(|w| w.steps).unwrap_or(0);
            format!("I walked {} steps today!", steps)
        }
        Achievement::Calories => {
            let calories = workout.and_then(|w| w.calories_burned).unwrap_or(0.0);
            format!("I burned {} calories in my recent workout!", calories)
        }
        Achievement::Distance => {
            let distance = workout.and_then(|w| w.distance).unwrap_or(0.0);
            format!("I ran {} miles today!", distance)
        }
    }
}
