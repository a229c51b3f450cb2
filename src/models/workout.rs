// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout and sensor models: raw store rows and canonical records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Workout document as stored in Firestore (`workouts` collection).
///
/// Every field is nullable; the normalizer decides what is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WorkoutRow {
    pub workout_id: Option<String>,
    pub user_id: Option<String>,
    #[serde(with = "firestore::serialize_as_optional_timestamp")]
    pub start_timestamp: Option<DateTime<Utc>>,
    #[serde(with = "firestore::serialize_as_optional_timestamp")]
    pub end_timestamp: Option<DateTime<Utc>>,
    pub start_location_lat: Option<f64>,
    pub start_location_long: Option<f64>,
    pub end_location_lat: Option<f64>,
    pub end_location_long: Option<f64>,
    /// Distance covered
    pub total_distance: Option<f64>,
    pub total_steps: Option<i64>,
    pub calories_burned: Option<f64>,
}

/// A latitude/longitude pair. Only ever built from two present values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Canonical workout record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Workout {
    pub workout_id: String,
    /// `YYYY-MM-DD HH:MM:SS`
    pub start_timestamp: Option<String>,
    /// `YYYY-MM-DD HH:MM:SS`
    pub end_timestamp: Option<String>,
    pub start_lat_lng: Option<LatLng>,
    pub end_lat_lng: Option<LatLng>,
    pub distance: Option<f64>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub steps: Option<i64>,
    pub calories_burned: Option<f64>,
}

/// Sensor reading joined with its sensor type, as returned by the store.
#[derive(Debug, Clone, Default)]
pub struct SensorReadingRow {
    pub timestamp: Option<DateTime<Utc>>,
    pub sensor_value: Option<f64>,
    pub sensor_name: Option<String>,
    pub sensor_units: Option<String>,
}

/// Canonical sensor reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SensorReading {
    pub sensor_type: String,
    /// `YYYY-MM-DDTHH:MM:SS`
    pub timestamp: Option<String>,
    pub data: Option<f64>,
    pub units: Option<String>,
}
