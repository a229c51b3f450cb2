// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard API routes.

use crate::db::DashboardStore;
use crate::error::{AppError, Result};
use crate::models::{
    AdviceResult, DailyMacroSummary, FeedPost, MealEntry, NewMeal, NewPost, Post, Profile,
    SensorReading,
};
use crate::services::{
    ActivitySummary, CommunityFeed, Created, TextGenerator, TodayMeals, WorkoutsView,
};
use crate::time_utils::parse_date;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;

/// API routes.
pub fn routes<S, G>() -> Router<Arc<AppState<S, G>>>
where
    S: DashboardStore + 'static,
    G: TextGenerator + 'static,
{
    Router::new()
        .route("/api/users/{user_id}/profile", get(get_profile::<S, G>))
        .route("/api/users/{user_id}/workouts", get(get_workouts::<S, G>))
        .route("/api/users/{user_id}/activity", get(get_activity::<S, G>))
        .route("/api/users/{user_id}/advice", get(get_advice::<S, G>))
        .route(
            "/api/users/{user_id}/posts",
            get(get_posts::<S, G>).post(create_post::<S, G>),
        )
        .route("/api/users/{user_id}/community", get(get_community::<S, G>))
        .route(
            "/api/users/{user_id}/meals",
            axum::routing::post(create_meal::<S, G>),
        )
        .route(
            "/api/users/{user_id}/meals/today",
            get(get_today_meals::<S, G>),
        )
        .route(
            "/api/users/{user_id}/meals/weekly",
            get(get_weekly_summary::<S, G>),
        )
        .route(
            "/api/users/{user_id}/nutrition/feedback",
            get(get_nutrition_feedback::<S, G>),
        )
        .route(
            "/api/workouts/{workout_id}/sensors",
            get(get_sensor_data::<S, G>),
        )
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

// ─── Query Parameters ────────────────────────────────────────

/// Optional inclusive day range (`YYYY-MM-DD`).
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DateRangeQuery {
    /// Both bounds or neither; anything else is a bad request.
    fn range(&self) -> Result<Option<(NaiveDate, NaiveDate)>> {
        match (self.start.as_deref(), self.end.as_deref()) {
            (None, None) => Ok(None),
            (Some(start), Some(end)) => {
                let start = parse_query_date(start)?;
                let end = parse_query_date(end)?;
                Ok(Some((start, end)))
            }
            _ => Err(AppError::BadRequest(
                "start and end must be given together".to_string(),
            )),
        }
    }
}

fn parse_query_date(raw: &str) -> Result<NaiveDate> {
    parse_date(raw).map_err(|_| AppError::BadRequest(format!("Invalid date: {}", raw)))
}

#[derive(Debug, Deserialize)]
pub struct CommunityQuery {
    pub limit: Option<u32>,
}

// ─── Profile & Posts ─────────────────────────────────────────

async fn get_profile<S: DashboardStore, G: TextGenerator>(
    State(state): State<Arc<AppState<S, G>>>,
    Path(user_id): Path<String>,
) -> Result<Json<Profile>> {
    Ok(Json(state.dashboard.profile(&user_id).await?))
}

async fn get_posts<S: DashboardStore, G: TextGenerator>(
    State(state): State<Arc<AppState<S, G>>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<FeedPost>>> {
    Ok(Json(state.dashboard.posts(&user_id).await?))
}

async fn create_post<S: DashboardStore, G: TextGenerator>(
    State(state): State<Arc<AppState<S, G>>>,
    Path(user_id): Path<String>,
    Json(input): Json<NewPost>,
) -> Result<(StatusCode, Json<Created<Post>>)> {
    let post = state.dashboard.create_post(&user_id, input).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

async fn get_community<S: DashboardStore, G: TextGenerator>(
    State(state): State<Arc<AppState<S, G>>>,
    Path(user_id): Path<String>,
    Query(query): Query<CommunityQuery>,
) -> Result<Json<CommunityFeed>> {
    let feed = state.dashboard.community(&user_id, query.limit).await?;
    Ok(Json(feed))
}

// ─── Workouts ────────────────────────────────────────────────

async fn get_workouts<S: DashboardStore, G: TextGenerator>(
    State(state): State<Arc<AppState<S, G>>>,
    Path(user_id): Path<String>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<WorkoutsView>> {
    let view = match query.range()? {
        Some((start, end)) => {
            state
                .dashboard
                .workouts_in_range(&user_id, start, end)
                .await?
        }
        None => WorkoutsView {
            workouts: state.dashboard.workouts(&user_id).await?,
            warnings: Vec::new(),
        },
    };
    Ok(Json(view))
}

async fn get_activity<S: DashboardStore, G: TextGenerator>(
    State(state): State<Arc<AppState<S, G>>>,
    Path(user_id): Path<String>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<ActivitySummary>> {
    let range = query.range()?;
    let summary = state.dashboard.activity_summary(&user_id, range).await?;
    Ok(Json(summary))
}

async fn get_advice<S: DashboardStore, G: TextGenerator>(
    State(state): State<Arc<AppState<S, G>>>,
    Path(user_id): Path<String>,
) -> Result<Json<AdviceResult>> {
    Ok(Json(state.dashboard.workout_advice(&user_id).await?))
}

async fn get_sensor_data<S: DashboardStore, G: TextGenerator>(
    State(state): State<Arc<AppState<S, G>>>,
    Path(workout_id): Path<String>,
) -> Result<Json<Vec<SensorReading>>> {
    Ok(Json(state.dashboard.sensor_data(&workout_id).await?))
}

// ─── Meals ───────────────────────────────────────────────────

async fn get_today_meals<S: DashboardStore, G: TextGenerator>(
    State(state): State<Arc<AppState<S, G>>>,
    Path(user_id): Path<String>,
) -> Result<Json<TodayMeals>> {
    Ok(Json(state.dashboard.today_meals(&user_id, today()).await?))
}

async fn create_meal<S: DashboardStore, G: TextGenerator>(
    State(state): State<Arc<AppState<S, G>>>,
    Path(user_id): Path<String>,
    Json(input): Json<NewMeal>,
) -> Result<(StatusCode, Json<Created<MealEntry>>)> {
    let meal = state.dashboard.create_meal(&user_id, input).await?;
    Ok((StatusCode::CREATED, Json(meal)))
}

async fn get_nutrition_feedback<S: DashboardStore, G: TextGenerator>(
    State(state): State<Arc<AppState<S, G>>>,
    Path(user_id): Path<String>,
) -> Result<Json<AdviceResult>> {
    let feedback = state.dashboard.nutrition_feedback(&user_id, today()).await?;
    Ok(Json(feedback))
}

async fn get_weekly_summary<S: DashboardStore, G: TextGenerator>(
    State(state): State<Arc<AppState<S, G>>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<DailyMacroSummary>>> {
    let summary = state.dashboard.weekly_summary(&user_id, today()).await?;
    Ok(Json(summary))
}
