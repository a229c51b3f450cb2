// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Generated advice/feedback result.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Advice or feedback text shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AdviceResult {
    /// Fresh UUID v4, unrelated to the content
    pub id: String,
    /// RFC3339 UTC, captured when the result was built
    pub timestamp: String,
    /// Never empty
    pub content: String,
    pub image: Option<String>,
}
