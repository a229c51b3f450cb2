// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fitness_dashboard::config::Config;
use fitness_dashboard::db::{DashboardStore, FirestoreDb};
use fitness_dashboard::error::{AppError, Result};
use fitness_dashboard::models::{
    FriendRow, MealRow, PostRow, ProfileRow, SensorReadingRow, WorkoutRow,
};
use fitness_dashboard::routes::create_router;
use fitness_dashboard::services::TextGenerator;
use fitness_dashboard::AppState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// UTC instant from calendar fields.
#[allow(dead_code)]
pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

#[allow(dead_code)]
pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ─── Row builders ────────────────────────────────────────────

#[allow(dead_code)]
pub fn workout_row(
    workout_id: &str,
    user_id: &str,
    start: DateTime<Utc>,
    distance: f64,
    calories: f64,
) -> WorkoutRow {
    WorkoutRow {
        workout_id: Some(workout_id.to_string()),
        user_id: Some(user_id.to_string()),
        start_timestamp: Some(start),
        end_timestamp: Some(start + chrono::Duration::minutes(45)),
        start_location_lat: Some(37.4),
        start_location_long: Some(-122.1),
        end_location_lat: Some(37.5),
        end_location_long: Some(-122.2),
        total_distance: Some(distance),
        total_steps: Some((distance * 1300.0) as i64),
        calories_burned: Some(calories),
    }
}

#[allow(dead_code)]
pub fn meal_row(meal_id: &str, user_id: &str, date: NaiveDate, calories: Option<f64>) -> MealRow {
    MealRow {
        meal_id: Some(meal_id.to_string()),
        user_id: Some(user_id.to_string()),
        meal_name: Some(format!("Meal {}", meal_id)),
        calories,
        protein: Some(20.0),
        carbs: Some(50.0),
        fats: Some(10.0),
        meal_date: Some(date),
        created_at: None,
    }
}

#[allow(dead_code)]
pub fn post_row(post_id: &str, author_id: &str, at: DateTime<Utc>, content: &str) -> PostRow {
    PostRow {
        post_id: Some(post_id.to_string()),
        author_id: Some(author_id.to_string()),
        timestamp: Some(at),
        content: Some(content.to_string()),
        image_url: None,
    }
}

#[allow(dead_code)]
pub fn profile_row(user_id: &str, username: &str) -> ProfileRow {
    ProfileRow {
        user_id: Some(user_id.to_string()),
        name: Some(format!("{} Example", username)),
        username: Some(username.to_string()),
        image_url: Some(format!("https://example.com/{}.png", username)),
        date_of_birth: None,
    }
}

// ─── In-memory store ─────────────────────────────────────────

#[derive(Default)]
pub struct StoreData {
    pub workouts: Vec<WorkoutRow>,
    pub sensor_readings: HashMap<String, Vec<SensorReadingRow>>,
    pub meals: Vec<MealRow>,
    pub posts: Vec<PostRow>,
    pub profiles: Vec<ProfileRow>,
    pub friends: Vec<FriendRow>,
    /// Row errors returned by every insert; empty means inserts succeed.
    pub insert_errors: Vec<String>,
    /// When set, every call fails as if the store were unreachable.
    pub offline: bool,
    /// Number of store calls made, reads and writes.
    pub calls: usize,
}

/// `DashboardStore` backed by vectors, in store insertion order.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    data: Arc<Mutex<StoreData>>,
}

#[allow(dead_code)]
impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> MutexGuard<'_, StoreData> {
        self.data.lock().unwrap()
    }

    pub fn calls(&self) -> usize {
        self.data().calls
    }

    /// Lock for one call, failing if offline.
    fn call(&self) -> Result<MutexGuard<'_, StoreData>> {
        let mut data = self.data();
        data.calls += 1;
        if data.offline {
            return Err(AppError::Upstream("in-memory store offline".to_string()));
        }
        Ok(data)
    }
}

fn start_day(row: &WorkoutRow) -> Option<NaiveDate> {
    row.start_timestamp.map(|ts| ts.date_naive())
}

impl DashboardStore for InMemoryStore {
    async fn workouts_for_user(&self, user_id: &str) -> Result<Vec<WorkoutRow>> {
        let data = self.call()?;
        Ok(data
            .workouts
            .iter()
            .filter(|w| w.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn workouts_in_range(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WorkoutRow>> {
        let data = self.call()?;
        Ok(data
            .workouts
            .iter()
            .filter(|w| w.user_id.as_deref() == Some(user_id))
            .filter(|w| start_day(w).is_some_and(|d| start <= d && d <= end))
            .cloned()
            .collect())
    }

    async fn latest_workout(&self, user_id: &str) -> Result<Option<WorkoutRow>> {
        let data = self.call()?;
        let mut rows: Vec<WorkoutRow> = data
            .workouts
            .iter()
            .filter(|w| w.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.end_timestamp.cmp(&a.end_timestamp));
        Ok(rows.into_iter().next())
    }

    async fn sensor_readings(&self, workout_id: &str) -> Result<Vec<SensorReadingRow>> {
        let data = self.call()?;
        Ok(data
            .sensor_readings
            .get(workout_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn meals_for_user(&self, user_id: &str) -> Result<Vec<MealRow>> {
        let data = self.call()?;
        Ok(data
            .meals
            .iter()
            .filter(|m| m.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn meals_on_date(&self, user_id: &str, date: NaiveDate) -> Result<Vec<MealRow>> {
        let data = self.call()?;
        Ok(data
            .meals
            .iter()
            .filter(|m| m.user_id.as_deref() == Some(user_id) && m.meal_date == Some(date))
            .cloned()
            .collect())
    }

    async fn meals_in_range(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MealRow>> {
        let data = self.call()?;
        Ok(data
            .meals
            .iter()
            .filter(|m| m.user_id.as_deref() == Some(user_id))
            .filter(|m| m.meal_date.is_some_and(|d| start <= d && d <= end))
            .cloned()
            .collect())
    }

    async fn posts_by_author(&self, author_id: &str) -> Result<Vec<PostRow>> {
        let data = self.call()?;
        Ok(data
            .posts
            .iter()
            .filter(|p| p.author_id.as_deref() == Some(author_id))
            .cloned()
            .collect())
    }

    async fn latest_posts_by_authors(
        &self,
        author_ids: &[String],
        limit: u32,
    ) -> Result<Vec<PostRow>> {
        let data = self.call()?;
        let mut rows: Vec<PostRow> = data
            .posts
            .iter()
            .filter(|p| {
                p.author_id
                    .as_ref()
                    .is_some_and(|a| author_ids.contains(a))
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn profile(&self, user_id: &str) -> Result<Option<ProfileRow>> {
        let data = self.call()?;
        Ok(data
            .profiles
            .iter()
            .find(|p| p.user_id.as_deref() == Some(user_id))
            .cloned())
    }

    async fn friend_ids(&self, user_id: &str) -> Result<Vec<String>> {
        let data = self.call()?;
        Ok(data
            .friends
            .iter()
            .filter_map(|f| match (f.user_id1.as_deref(), f.user_id2.as_deref()) {
                (Some(a), Some(b)) if a == user_id => Some(b.to_string()),
                (Some(a), Some(b)) if b == user_id => Some(a.to_string()),
                _ => None,
            })
            .collect())
    }

    async fn insert_post(&self, row: &PostRow) -> Result<Vec<String>> {
        let mut data = self.call()?;
        if !data.insert_errors.is_empty() {
            return Ok(data.insert_errors.clone());
        }
        data.posts.push(row.clone());
        Ok(Vec::new())
    }

    async fn insert_meal(&self, row: &MealRow) -> Result<Vec<String>> {
        let mut data = self.call()?;
        if !data.insert_errors.is_empty() {
            return Ok(data.insert_errors.clone());
        }
        data.meals.push(row.clone());
        Ok(Vec::new())
    }
}

// ─── Scripted generator ──────────────────────────────────────

/// `TextGenerator` that returns a fixed reply and records every prompt.
#[derive(Clone, Default)]
pub struct ScriptedGenerator {
    reply: Option<String>,
    fail: bool,
    prompts: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl ScriptedGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            ..Default::default()
        }
    }

    /// A generator whose replies carry no text.
    pub fn silent() -> Self {
        Self::default()
    }

    /// A generator whose every call fails in transport.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<Option<String>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            return Err(AppError::Upstream("model unavailable".to_string()));
        }
        Ok(self.reply.clone())
    }
}

pub type TestState = AppState<InMemoryStore, ScriptedGenerator>;

/// Create a test app over in-memory collaborators.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(
    store: InMemoryStore,
    generator: ScriptedGenerator,
) -> (axum::Router, Arc<TestState>) {
    let state = Arc::new(AppState::new(Config::test_default(), store, generator));
    (create_router(state.clone()), state)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
