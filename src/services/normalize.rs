// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record normalization: raw store rows into canonical records.
//!
//! Rows are validated once here so nothing downstream deals with raw,
//! nullable store fields. Absence is always an explicit `None`; a stored
//! `0` or `0.0` is a value like any other.

use crate::error::{AppError, Result};
use crate::models::{
    LatLng, MealEntry, MealRow, Post, PostRow, Profile, ProfileRow, SensorReading,
    SensorReadingRow, Workout, WorkoutRow,
};
use crate::time_utils::{format_display, SENSOR_TIMESTAMP_FORMAT};

/// Take a required identity field, rejecting null or blank values.
fn required(value: Option<String>, entity: &str, field: &str, index: usize) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::DataIntegrity(format!(
            "{} row {} is missing {}",
            entity, index, field
        ))),
    }
}

/// Build a coordinate pair only when both halves are present.
fn lat_lng(lat: Option<f64>, lng: Option<f64>) -> Option<LatLng> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => Some(LatLng { lat, lng }),
        _ => None,
    }
}

fn non_negative(value: Option<f64>, field: &str, index: usize) -> Result<Option<f64>> {
    match value {
        Some(v) if v < 0.0 || v.is_nan() => Err(AppError::DataIntegrity(format!(
            "meal row {} has invalid {}: {}",
            index, field, v
        ))),
        other => Ok(other),
    }
}

/// Normalize one workout row.
pub fn normalize_workout(index: usize, row: WorkoutRow) -> Result<Workout> {
    let workout_id = required(row.workout_id, "workout", "WorkoutId", index)?;

    if let (Some(start), Some(end)) = (row.start_timestamp, row.end_timestamp) {
        if start > end {
            return Err(AppError::DataIntegrity(format!(
                "workout {} ends before it starts",
                workout_id
            )));
        }
    }

    Ok(Workout {
        workout_id,
        start_timestamp: row.start_timestamp.map(format_display),
        end_timestamp: row.end_timestamp.map(format_display),
        start_lat_lng: lat_lng(row.start_location_lat, row.start_location_long),
        end_lat_lng: lat_lng(row.end_location_lat, row.end_location_long),
        distance: row.total_distance,
        steps: row.total_steps,
        calories_burned: row.calories_burned,
    })
}

/// Normalize a batch of workout rows. Any invalid row fails the batch.
pub fn normalize_workouts(rows: Vec<WorkoutRow>) -> Result<Vec<Workout>> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| normalize_workout(index, row))
        .collect()
}

/// Normalize sensor readings for one workout.
pub fn normalize_sensor_readings(rows: Vec<SensorReadingRow>) -> Result<Vec<SensorReading>> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            Ok(SensorReading {
                sensor_type: required(row.sensor_name, "sensor reading", "SensorName", index)?,
                timestamp: row
                    .timestamp
                    .map(|ts| ts.format(SENSOR_TIMESTAMP_FORMAT).to_string()),
                data: row.sensor_value,
                units: row.sensor_units,
            })
        })
        .collect()
}

/// Normalize one meal row.
pub fn normalize_meal(index: usize, row: MealRow) -> Result<MealEntry> {
    Ok(MealEntry {
        meal_id: required(row.meal_id, "meal", "MealId", index)?,
        user_id: required(row.user_id, "meal", "UserId", index)?,
        meal_name: row.meal_name,
        date: row.meal_date,
        calories: non_negative(row.calories, "Calories", index)?,
        protein: non_negative(row.protein, "Protein", index)?,
        carbs: non_negative(row.carbs, "Carbs", index)?,
        fat: non_negative(row.fats, "Fats", index)?,
        created_at: row.created_at.map(format_display),
    })
}

/// Normalize a batch of meal rows.
pub fn normalize_meals(rows: Vec<MealRow>) -> Result<Vec<MealEntry>> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| normalize_meal(index, row))
        .collect()
}

/// Normalize one post row.
pub fn normalize_post(index: usize, row: PostRow) -> Result<Post> {
    Ok(Post {
        post_id: required(row.post_id, "post", "PostId", index)?,
        user_id: required(row.author_id, "post", "AuthorId", index)?,
        timestamp: row.timestamp.map(format_display),
        content: row.content.unwrap_or_default(),
        image: row.image_url,
    })
}

/// Normalize a batch of post rows.
pub fn normalize_posts(rows: Vec<PostRow>) -> Result<Vec<Post>> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| normalize_post(index, row))
        .collect()
}

/// Normalize a profile row.
pub fn normalize_profile(row: ProfileRow) -> Result<Profile> {
    Ok(Profile {
        user_id: required(row.user_id, "profile", "UserId", 0)?,
        full_name: row.name,
        username: row.username,
        profile_image: row.image_url,
        date_of_birth: row.date_of_birth,
    })
}
