// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived statistics for the dashboard.
//!
//! Nothing here is persisted: every value is recomputed from the store's
//! current rows on each request.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{MealEntry, Workout};

/// Totals across a set of workouts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutSummary {
    pub total_distance: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_steps: i64,
    pub total_calories: f64,
}

impl WorkoutSummary {
    /// Add one workout. Missing fields contribute zero.
    pub fn add(&mut self, workout: &Workout) {
        self.total_distance += workout.distance.unwrap_or(0.0);
        self.total_steps += workout.steps.unwrap_or(0);
        self.total_calories += workout.calories_burned.unwrap_or(0.0);
    }
}

/// Calorie and macro totals across a set of meals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MacroTotals {
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_fats: f64,
    pub total_carbs: f64,
}

impl MacroTotals {
    /// Add one meal. Missing fields contribute zero.
    pub fn add(&mut self, meal: &MealEntry) {
        self.total_calories += meal.calories.unwrap_or(0.0);
        self.total_protein += meal.protein.unwrap_or(0.0);
        self.total_fats += meal.fat.unwrap_or(0.0);
        self.total_carbs += meal.carbs.unwrap_or(0.0);
    }
}

/// Macro totals for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyMacroSummary {
    /// `YYYY-MM-DD`
    pub date: String,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_fats: f64,
    pub total_carbs: f64,
}

/// One point of the per-workout distance/steps charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutChartPoint {
    /// "Workout 1", "Workout 2", ...
    pub label: String,
    pub distance: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub steps: i64,
}
