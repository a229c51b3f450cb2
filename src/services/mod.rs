// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod advice;
pub mod aggregate;
pub mod dashboard;
pub mod filter;
pub mod gemini;
pub mod normalize;
pub mod writer;

pub use advice::{AdviceGenerator, TextGenerator};
pub use dashboard::{
    ActivitySummary, CommunityFeed, DashboardService, ShareSuggestions, TodayMeals, WorkoutsView,
};
pub use filter::{filter_by_date_range, FilterOutcome, FilterWarning, Timestamped};
pub use gemini::GeminiClient;
pub use writer::Created;
