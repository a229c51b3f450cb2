// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fitness dashboard backend.
//!
//! Reads workouts, meals, sensor readings and posts from Firestore, derives
//! summaries and AI-generated advice from them, and appends new posts and
//! meal entries on behalf of the user.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{AdviceGenerator, DashboardService, GeminiClient};

/// Shared application state.
///
/// Generic over the store and the text generator so tests can run the full
/// router against in-memory collaborators.
pub struct AppState<S = FirestoreDb, G = GeminiClient> {
    pub config: Config,
    pub dashboard: DashboardService<S, G>,
}

impl<S, G> AppState<S, G>
where
    S: db::DashboardStore,
    G: services::TextGenerator,
{
    /// Wire the dashboard service from config and collaborators.
    pub fn new(config: Config, store: S, generator: G) -> Self {
        let advice = AdviceGenerator::new(generator, config.advice_image_url.clone());
        let dashboard = DashboardService::new(store, advice, config.community_feed_limit);
        Self { config, dashboard }
    }
}
