// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal entry models for calorie and macro tracking.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Meal document as stored in Firestore (`calorie_tracking` collection).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MealRow {
    pub meal_id: Option<String>,
    pub user_id: Option<String>,
    pub meal_name: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
    /// Day the meal was eaten (stored as `YYYY-MM-DD`)
    pub meal_date: Option<NaiveDate>,
    #[serde(with = "firestore::serialize_as_optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Canonical meal entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MealEntry {
    pub meal_id: String,
    pub user_id: String,
    pub meal_name: Option<String>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub date: Option<NaiveDate>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    /// `YYYY-MM-DD HH:MM:SS`
    pub created_at: Option<String>,
}

/// User-submitted meal.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewMeal {
    #[validate(length(min = 1, max = 200, message = "meal name must be 1-200 characters"))]
    pub meal_name: String,
    pub date: NaiveDate,
    #[validate(range(min = 0.0, message = "calories must be non-negative"))]
    pub calories: f64,
    #[validate(range(min = 0.0, message = "protein must be non-negative"))]
    pub protein: f64,
    #[validate(range(min = 0.0, message = "carbs must be non-negative"))]
    pub carbs: f64,
    #[validate(range(min = 0.0, message = "fat must be non-negative"))]
    pub fat: f64,
}
