// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod advice;
pub mod meal;
pub mod post;
pub mod profile;
pub mod stats;
pub mod workout;

pub use advice::AdviceResult;
pub use meal::{MealEntry, MealRow, NewMeal};
pub use post::{FeedPost, NewPost, Post, PostRow};
pub use profile::{FriendRow, Profile, ProfileRow};
pub use stats::{DailyMacroSummary, MacroTotals, WorkoutChartPoint, WorkoutSummary};
pub use workout::{LatLng, SensorReading, SensorReadingRow, Workout, WorkoutRow};
