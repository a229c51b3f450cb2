// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides the dashboard queries over:
//! - Workouts and their sensor readings
//! - Calorie tracking (meal entries)
//! - Posts and friendships
//! - User profiles

use crate::db::{collections, DashboardStore};
use crate::error::{AppError, Result};
use crate::models::{FriendRow, MealRow, PostRow, ProfileRow, SensorReadingRow, WorkoutRow};
use crate::time_utils::DATE_FORMAT;
use chrono::{DateTime, NaiveDate, Utc};
use futures_util::{stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Sensor reading document (`sensor_readings` collection).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct SensorReadingDoc {
    workout_id: Option<String>,
    sensor_id: Option<String>,
    #[serde(with = "firestore::serialize_as_optional_timestamp")]
    timestamp: Option<DateTime<Utc>>,
    sensor_value: Option<f64>,
}

/// Sensor type document (`sensor_types` collection, keyed by sensor ID).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct SensorTypeDoc {
    name: Option<String>,
    units: Option<String>,
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

fn db_error(e: firestore::errors::FirestoreError) -> AppError {
    AppError::Upstream(format!("Firestore: {}", e))
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self> {
        // The emulator takes an unauthenticated connection.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Upstream(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Upstream("Database not connected (offline mode)".to_string()))
    }

    /// Look up sensor types by ID, fetching each distinct ID once.
    async fn sensor_types(&self, sensor_ids: Vec<String>) -> Result<HashMap<String, SensorTypeDoc>> {
        let client = self.get_client()?;

        let found = stream::iter(sensor_ids)
            .map(|sensor_id| async move {
                let doc: Option<SensorTypeDoc> = client
                    .fluent()
                    .select()
                    .by_id_in(collections::SENSOR_TYPES)
                    .obj()
                    .one(&sensor_id)
                    .await
                    .map_err(db_error)?;
                Ok::<_, AppError>(doc.map(|d| (sensor_id, d)))
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<Option<(String, SensorTypeDoc)>>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        Ok(found.into_iter().flatten().collect())
    }
}

impl DashboardStore for FirestoreDb {
    // ─── Workout Operations ──────────────────────────────────────

    async fn workouts_for_user(&self, user_id: &str) -> Result<Vec<WorkoutRow>> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::WORKOUTS)
            .filter(|q| q.for_all([q.field("UserId").eq(user_id)]))
            .obj()
            .query()
            .await
            .map_err(db_error)
    }

    async fn workouts_in_range(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WorkoutRow>> {
        // Ranged timestamp filters need a composite index per user; the
        // per-user set is small, so the day comparison happens here instead.
        let rows = self.workouts_for_user(user_id).await?;
        Ok(rows
            .into_iter()
            .filter(|row| {
                row.start_timestamp
                    .map(|ts| ts.date_naive())
                    .is_some_and(|day| start <= day && day <= end)
            })
            .collect())
    }

    async fn latest_workout(&self, user_id: &str) -> Result<Option<WorkoutRow>> {
        let rows: Vec<WorkoutRow> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::WORKOUTS)
            .filter(|q| q.for_all([q.field("UserId").eq(user_id)]))
            .order_by([("EndTimestamp", firestore::FirestoreQueryDirection::Descending)])
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().next())
    }

    async fn sensor_readings(&self, workout_id: &str) -> Result<Vec<SensorReadingRow>> {
        let docs: Vec<SensorReadingDoc> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::SENSOR_READINGS)
            .filter(|q| q.for_all([q.field("WorkoutId").eq(workout_id)]))
            .order_by([("Timestamp", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(db_error)?;

        let mut sensor_ids: Vec<String> = docs.iter().filter_map(|d| d.sensor_id.clone()).collect();
        sensor_ids.sort();
        sensor_ids.dedup();
        let types = self.sensor_types(sensor_ids).await?;

        Ok(docs
            .into_iter()
            .map(|doc| {
                let sensor_type = doc.sensor_id.as_ref().and_then(|id| types.get(id));
                SensorReadingRow {
                    timestamp: doc.timestamp,
                    sensor_value: doc.sensor_value,
                    sensor_name: sensor_type.and_then(|t| t.name.clone()),
                    sensor_units: sensor_type.and_then(|t| t.units.clone()),
                }
            })
            .collect())
    }

    // ─── Meal Operations ─────────────────────────────────────────

    async fn meals_for_user(&self, user_id: &str) -> Result<Vec<MealRow>> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::MEALS)
            .filter(|q| q.for_all([q.field("UserId").eq(user_id)]))
            .obj()
            .query()
            .await
            .map_err(db_error)
    }

    async fn meals_on_date(&self, user_id: &str, date: NaiveDate) -> Result<Vec<MealRow>> {
        let day = date.format(DATE_FORMAT).to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::MEALS)
            .filter(move |q| {
                q.for_all([
                    q.field("UserId").eq(user_id),
                    q.field("MealDate").eq(day.clone()),
                ])
            })
            .obj()
            .query()
            .await
            .map_err(db_error)
    }

    async fn meals_in_range(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MealRow>> {
        // Meal dates are stored as YYYY-MM-DD, so string order is date order.
        let start = start.format(DATE_FORMAT).to_string();
        let end = end.format(DATE_FORMAT).to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::MEALS)
            .filter(move |q| {
                q.for_all([
                    q.field("UserId").eq(user_id),
                    q.field("MealDate").greater_than_or_equal(start.clone()),
                    q.field("MealDate").less_than_or_equal(end.clone()),
                ])
            })
            .order_by([("MealDate", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(db_error)
    }

    // ─── Post Operations ─────────────────────────────────────────

    async fn posts_by_author(&self, author_id: &str) -> Result<Vec<PostRow>> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::POSTS)
            .filter(|q| q.for_all([q.field("AuthorId").eq(author_id)]))
            .obj()
            .query()
            .await
            .map_err(db_error)
    }

    async fn latest_posts_by_authors(
        &self,
        author_ids: &[String],
        limit: u32,
    ) -> Result<Vec<PostRow>> {
        let client = self.get_client()?;

        let mut rows: Vec<PostRow> = stream::iter(author_ids.to_vec())
            .map(|author_id| async move {
                client
                    .fluent()
                    .select()
                    .from(collections::POSTS)
                    .filter(|q| q.for_all([q.field("AuthorId").eq(author_id.as_str())]))
                    .order_by([("Timestamp", firestore::FirestoreQueryDirection::Descending)])
                    .limit(limit)
                    .obj::<PostRow>()
                    .query()
                    .await
                    .map_err(db_error)
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<Vec<PostRow>>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<Vec<PostRow>>>>()?
            .into_iter()
            .flatten()
            .collect();

        // Newest first; undated posts sort last.
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    // ─── User Operations ─────────────────────────────────────────

    async fn profile(&self, user_id: &str) -> Result<Option<ProfileRow>> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(db_error)
    }

    async fn friend_ids(&self, user_id: &str) -> Result<Vec<String>> {
        let client = self.get_client()?;

        let as_first: Vec<FriendRow> = client
            .fluent()
            .select()
            .from(collections::FRIENDS)
            .filter(|q| q.for_all([q.field("UserId1").eq(user_id)]))
            .obj()
            .query()
            .await
            .map_err(db_error)?;

        let as_second: Vec<FriendRow> = client
            .fluent()
            .select()
            .from(collections::FRIENDS)
            .filter(|q| q.for_all([q.field("UserId2").eq(user_id)]))
            .obj()
            .query()
            .await
            .map_err(db_error)?;

        let mut ids: Vec<String> = Vec::new();
        let others = as_first
            .into_iter()
            .filter_map(|f| f.user_id2)
            .chain(as_second.into_iter().filter_map(|f| f.user_id1));
        for id in others {
            if id != user_id && !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    // ─── Append Operations ───────────────────────────────────────

    async fn insert_post(&self, row: &PostRow) -> Result<Vec<String>> {
        let client = self.get_client()?;
        // Post IDs are per-author sequence numbers, so the document ID carries the author.
        let doc_id = format!(
            "{}_{}",
            row.author_id.as_deref().unwrap_or_default(),
            row.post_id.as_deref().unwrap_or_default()
        );

        let inserted = client
            .fluent()
            .insert()
            .into(collections::POSTS)
            .document_id(&doc_id)
            .object(row)
            .execute::<PostRow>()
            .await;

        Ok(match inserted {
            Ok(_) => Vec::new(),
            Err(e) => vec![e.to_string()],
        })
    }

    async fn insert_meal(&self, row: &MealRow) -> Result<Vec<String>> {
        let client = self.get_client()?;
        let doc_id = format!(
            "{}_{}",
            row.user_id.as_deref().unwrap_or_default(),
            row.meal_id.as_deref().unwrap_or_default()
        );

        let inserted = client
            .fluent()
            .insert()
            .into(collections::MEALS)
            .document_id(&doc_id)
            .object(row)
            .execute::<MealRow>()
            .await;

        Ok(match inserted {
            Ok(_) => Vec::new(),
            Err(e) => vec![e.to_string()],
        })
    }
}
