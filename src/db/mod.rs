// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! [`DashboardStore`] is the read/append interface the dashboard needs from
//! the remote store. [`FirestoreDb`] implements it against Firestore.

pub mod firestore;

pub use firestore::FirestoreDb;

use crate::error::Result;
use crate::models::{MealRow, PostRow, ProfileRow, SensorReadingRow, WorkoutRow};
use chrono::NaiveDate;
use std::future::Future;

/// Collection names as constants.
pub mod collections {
    pub const WORKOUTS: &str = "workouts";
    pub const SENSOR_READINGS: &str = "sensor_readings";
    pub const SENSOR_TYPES: &str = "sensor_types";
    pub const MEALS: &str = "calorie_tracking";
    pub const POSTS: &str = "posts";
    pub const USERS: &str = "users";
    pub const FRIENDS: &str = "friends";
}

/// Remote store queries used by the dashboard.
///
/// Reads return raw rows; normalization happens in the service layer.
/// Inserts return the list of row errors reported by the store, where an
/// empty list means the row was written. Transport failures are `Err`.
pub trait DashboardStore: Send + Sync {
    /// All workouts for a user, in store order.
    fn workouts_for_user(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<WorkoutRow>>> + Send;

    /// Workouts whose start timestamp falls on a day in `start..=end`.
    fn workouts_in_range(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = Result<Vec<WorkoutRow>>> + Send;

    /// The workout with the latest end timestamp, if any.
    fn latest_workout(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Option<WorkoutRow>>> + Send;

    /// Sensor readings for a workout, ordered by timestamp.
    fn sensor_readings(
        &self,
        workout_id: &str,
    ) -> impl Future<Output = Result<Vec<SensorReadingRow>>> + Send;

    /// All meal entries for a user.
    fn meals_for_user(&self, user_id: &str) -> impl Future<Output = Result<Vec<MealRow>>> + Send;

    /// Meal entries for a user on one day.
    fn meals_on_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<MealRow>>> + Send;

    /// Meal entries for a user with a meal date in `start..=end`.
    fn meals_in_range(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = Result<Vec<MealRow>>> + Send;

    /// All posts written by an author.
    fn posts_by_author(&self, author_id: &str) -> impl Future<Output = Result<Vec<PostRow>>> + Send;

    /// Newest posts across a set of authors, newest first, at most `limit`.
    fn latest_posts_by_authors(
        &self,
        author_ids: &[String],
        limit: u32,
    ) -> impl Future<Output = Result<Vec<PostRow>>> + Send;

    /// User profile by ID.
    fn profile(&self, user_id: &str) -> impl Future<Output = Result<Option<ProfileRow>>> + Send;

    /// IDs of everyone the user is friends with.
    fn friend_ids(&self, user_id: &str) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Append one post.
    fn insert_post(&self, row: &PostRow) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Append one meal entry.
    fn insert_meal(&self, row: &MealRow) -> impl Future<Output = Result<Vec<String>>> + Send;
}
