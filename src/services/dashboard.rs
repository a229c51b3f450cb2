// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-request orchestration of the dashboard.
//!
//! Every operation validates its identifier, queries the store, normalizes
//! the rows and then filters, aggregates or generates from the canonical
//! records. Nothing is cached between requests.

use crate::db::DashboardStore;
use crate::error::{AppError, Result};
use crate::models::{
    AdviceResult, DailyMacroSummary, FeedPost, MacroTotals, MealEntry, NewMeal, NewPost, Post,
    Profile, SensorReading, Workout, WorkoutChartPoint, WorkoutSummary,
};
use crate::services::advice::{AdviceGenerator, TextGenerator};
use crate::services::aggregate::{
    daily_macro_totals, day_totals, most_recent, summarize_workouts, trailing_window,
    workout_chart, RECENT_WORKOUTS_SHOWN, WEEKLY_WINDOW_DAYS,
};
use crate::services::filter::{filter_by_date_range, FilterWarning};
use crate::services::normalize::{
    normalize_meals, normalize_posts, normalize_profile, normalize_sensor_readings,
    normalize_workout, normalize_workouts,
};
use crate::services::writer::{self, achievement_text, Achievement, Created};
use chrono::NaiveDate;
use futures_util::{stream, StreamExt};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Maximum concurrent profile lookups when building a feed.
const MAX_CONCURRENT_LOOKUPS: usize = 10;

/// Workouts kept by a date-range query, with any per-record warnings.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutsView {
    pub workouts: Vec<Workout>,
    pub warnings: Vec<FilterWarning>,
}

/// Ready-made share texts for the latest workout in a view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ShareSuggestions {
    pub steps: String,
    pub calories: String,
    pub distance: String,
}

/// Everything the activity page shows.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitySummary {
    pub totals: WorkoutSummary,
    pub workouts: Vec<Workout>,
    pub chart: Vec<WorkoutChartPoint>,
    pub recent: Vec<Workout>,
    pub share: ShareSuggestions,
    pub warnings: Vec<FilterWarning>,
}

/// Today's meals and their totals. `totals` is absent when nothing with a
/// calorie value was logged.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TodayMeals {
    pub meals: Vec<MealEntry>,
    pub totals: Option<MacroTotals>,
}

/// Friends' latest posts plus advice for the user.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CommunityFeed {
    pub posts: Vec<FeedPost>,
    pub advice: AdviceResult,
}

/// Reject empty identifiers before anything reaches the store.
fn require_id(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} must not be empty", what)));
    }
    Ok(())
}

/// Dashboard operations over a store and a text generator.
pub struct DashboardService<S, G> {
    store: S,
    advice: AdviceGenerator<G>,
    feed_limit: u32,
}

impl<S: DashboardStore, G: TextGenerator> DashboardService<S, G> {
    pub fn new(store: S, advice: AdviceGenerator<G>, feed_limit: u32) -> Self {
        Self {
            store,
            advice,
            feed_limit,
        }
    }

    /// All workouts for a user.
    pub async fn workouts(&self, user_id: &str) -> Result<Vec<Workout>> {
        require_id(user_id, "user id")?;
        let rows = self.store.workouts_for_user(user_id).await?;
        normalize_workouts(rows)
    }

    /// Workouts that started on a day in `start..=end`.
    pub async fn workouts_in_range(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<WorkoutsView> {
        require_id(user_id, "user id")?;
        if end < start {
            return Ok(WorkoutsView {
                workouts: Vec::new(),
                warnings: Vec::new(),
            });
        }

        let rows = self.store.workouts_in_range(user_id, start, end).await?;
        let outcome = filter_by_date_range(normalize_workouts(rows)?, start, end);

        Ok(WorkoutsView {
            workouts: outcome.records,
            warnings: outcome.warnings,
        })
    }

    /// Totals, chart series and share texts for all workouts or a date range.
    #[tracing::instrument(skip(self))]
    pub async fn activity_summary(
        &self,
        user_id: &str,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<ActivitySummary> {
        let view = match range {
            Some((start, end)) => self.workouts_in_range(user_id, start, end).await?,
            None => WorkoutsView {
                workouts: self.workouts(user_id).await?,
                warnings: Vec::new(),
            },
        };

        let workouts = view.workouts;
        let latest = workouts.last();

        Ok(ActivitySummary {
            totals: summarize_workouts(&workouts),
            chart: workout_chart(&workouts),
            recent: workouts
                .iter()
                .take(RECENT_WORKOUTS_SHOWN)
                .cloned()
                .collect(),
            share: ShareSuggestions {
                steps: achievement_text(Achievement::Steps, latest),
                calories: achievement_text(Achievement::Calories, latest),
                distance: achievement_text(Achievement::Distance, latest),
            },
            warnings: view.warnings,
            workouts,
        })
    }

    /// Sensor readings recorded during a workout.
    pub async fn sensor_data(&self, workout_id: &str) -> Result<Vec<SensorReading>> {
        require_id(workout_id, "workout id")?;
        let rows = self.store.sensor_readings(workout_id).await?;
        normalize_sensor_readings(rows)
    }

    /// Advice based on the user's most recent workout.
    pub async fn workout_advice(&self, user_id: &str) -> Result<AdviceResult> {
        require_id(user_id, "user id")?;
        let latest = match most_recent(self.store.latest_workout(user_id).await?) {
            Some(row) => Some(normalize_workout(0, row)?),
            None => None,
        };
        self.advice.workout_advice(latest.as_ref()).await
    }

    /// Meals logged on `today`, with their totals.
    pub async fn today_meals(&self, user_id: &str, today: NaiveDate) -> Result<TodayMeals> {
        require_id(user_id, "user id")?;
        let meals = normalize_meals(self.store.meals_on_date(user_id, today).await?)?;
        let totals = day_totals(&meals);
        Ok(TodayMeals { meals, totals })
    }

    /// Feedback on what the user ate on `today`.
    pub async fn nutrition_feedback(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<AdviceResult> {
        let TodayMeals { totals, .. } = self.today_meals(user_id, today).await?;
        self.advice.nutrition_feedback(totals.as_ref()).await
    }

    /// Per-day macro totals for the week ending on `today`.
    pub async fn weekly_summary(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<Vec<DailyMacroSummary>> {
        require_id(user_id, "user id")?;
        let (start, end) = trailing_window(today, WEEKLY_WINDOW_DAYS);
        let meals = normalize_meals(self.store.meals_in_range(user_id, start, end).await?)?;
        Ok(daily_macro_totals(&meals, today, WEEKLY_WINDOW_DAYS))
    }

    /// A user's profile.
    pub async fn profile(&self, user_id: &str) -> Result<Profile> {
        require_id(user_id, "user id")?;
        match self.store.profile(user_id).await? {
            Some(row) => normalize_profile(row),
            None => Err(AppError::NotFound(format!("user {}", user_id))),
        }
    }

    /// A user's own posts, shown with their profile.
    pub async fn posts(&self, user_id: &str) -> Result<Vec<FeedPost>> {
        require_id(user_id, "user id")?;
        let posts = normalize_posts(self.store.posts_by_author(user_id).await?)?;
        let profiles = self.profiles_for(&posts).await?;
        Ok(join_authors(posts, &profiles))
    }

    /// Friends' latest posts, newest first, plus workout advice.
    pub async fn community(&self, user_id: &str, limit: Option<u32>) -> Result<CommunityFeed> {
        require_id(user_id, "user id")?;
        let limit = limit.unwrap_or(self.feed_limit);

        let friends = self.store.friend_ids(user_id).await?;
        let posts = if friends.is_empty() {
            tracing::info!(user_id, "User has no friends, community feed is empty");
            Vec::new()
        } else {
            let rows = self.store.latest_posts_by_authors(&friends, limit).await?;
            let posts = normalize_posts(rows)?;
            let profiles = self.profiles_for(&posts).await?;
            join_authors(posts, &profiles)
        };

        let advice = self.workout_advice(user_id).await?;
        Ok(CommunityFeed { posts, advice })
    }

    /// Share a new post.
    pub async fn create_post(&self, user_id: &str, input: NewPost) -> Result<Created<Post>> {
        require_id(user_id, "user id")?;
        writer::append_post(&self.store, user_id, input).await
    }

    /// Log a new meal.
    pub async fn create_meal(&self, user_id: &str, input: NewMeal) -> Result<Created<MealEntry>> {
        require_id(user_id, "user id")?;
        writer::append_meal(&self.store, user_id, input).await
    }

    /// Profiles of every distinct author in `posts`, fetched concurrently.
    async fn profiles_for(&self, posts: &[Post]) -> Result<HashMap<String, Profile>> {
        let authors: BTreeSet<String> = posts.iter().map(|p| p.user_id.clone()).collect();
        let store = &self.store;

        let found = stream::iter(authors)
            .map(|author_id: String| async move { store.profile(&author_id).await })
            .buffer_unordered(MAX_CONCURRENT_LOOKUPS)
            .collect::<Vec<Result<_>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        found
            .into_iter()
            .flatten()
            .map(|row| normalize_profile(row).map(|p| (p.user_id.clone(), p)))
            .collect()
    }
}

/// Attach author name and image to each post. Authors without a profile get
/// empty fields.
fn join_authors(posts: Vec<Post>, profiles: &HashMap<String, Profile>) -> Vec<FeedPost> {
    posts
        .into_iter()
        .map(|post| {
            let author = profiles.get(&post.user_id);
            FeedPost {
                post_image: post.display_image().map(str::to_string),
                username: author.and_then(|a| a.username.clone()),
                user_image: author.and_then(|a| a.profile_image.clone()),
                post_id: post.post_id,
                timestamp: post.timestamp,
                content: post.content,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str, author: &str, image: Option<&str>) -> Post {
        Post {
            post_id: id.to_string(),
            user_id: author.to_string(),
            timestamp: Some("2024-07-29 10:00:00".to_string()),
            content: "Morning run".to_string(),
            image: image.map(String::from),
        }
    }

    #[test]
    fn test_require_id() {
        assert!(require_id("user1", "user id").is_ok());
        assert!(matches!(
            require_id("  ", "user id"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_join_authors_filters_non_http_images() {
        let mut profiles = HashMap::new();
        profiles.insert(
            "user2".to_string(),
            Profile {
                user_id: "user2".to_string(),
                full_name: Some("Bo Lee".to_string()),
                username: Some("bolee".to_string()),
                profile_image: Some("https://example.com/bo.png".to_string()),
                date_of_birth: None,
            },
        );

        let feed = join_authors(
            vec![
                post("post1", "user2", Some("https://example.com/p.jpg")),
                post("post2", "user2", Some("local/p.jpg")),
                post("post1", "user3", None),
            ],
            &profiles,
        );

        assert_eq!(
            feed[0].post_image.as_deref(),
            Some("https://example.com/p.jpg")
        );
        assert_eq!(feed[0].username.as_deref(), Some("bolee"));
        assert!(feed[1].post_image.is_none());
        assert!(feed[2].username.is_none());
        assert!(feed[2].user_image.is_none());
    }
}
