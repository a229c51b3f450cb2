// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Social post models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Post document as stored in Firestore (`posts` collection).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PostRow {
    pub post_id: Option<String>,
    pub author_id: Option<String>,
    #[serde(with = "firestore::serialize_as_optional_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    pub content: Option<String>,
    pub image_url: Option<String>,
}

/// Canonical post.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Post {
    pub post_id: String,
    pub user_id: String,
    /// `YYYY-MM-DD HH:MM:SS`
    pub timestamp: Option<String>,
    pub content: String,
    pub image: Option<String>,
}

impl Post {
    /// Image reference suitable for display (only absolute http(s) links).
    pub fn display_image(&self) -> Option<&str> {
        self.image.as_deref().filter(|url| url.starts_with("http"))
    }
}

/// Post joined with its author's profile, ready for display.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FeedPost {
    pub post_id: String,
    pub username: Option<String>,
    pub user_image: Option<String>,
    pub timestamp: Option<String>,
    pub content: String,
    pub post_image: Option<String>,
}

/// User-submitted post.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPost {
    #[validate(length(min = 1, max = 2000, message = "content must be 1-2000 characters"))]
    pub content: String,
    #[validate(url(message = "image must be a URL"))]
    pub image_url: Option<String>,
}
