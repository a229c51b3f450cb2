// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile and friendship models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// User document as stored in Firestore (`users` collection).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ProfileRow {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub username: Option<String>,
    pub image_url: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

/// Canonical user profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Profile {
    pub user_id: String,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub profile_image: Option<String>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub date_of_birth: Option<NaiveDate>,
}

/// Friendship edge (`friends` collection). Either side may be the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FriendRow {
    pub user_id1: Option<String>,
    pub user_id2: Option<String>,
}
