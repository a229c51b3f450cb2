// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Display format for workout, post, and meal timestamps.
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format for sensor reading timestamps.
pub const SENSOR_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Day-granularity date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format a UTC timestamp in the fixed display format.
pub fn format_display(date: DateTime<Utc>) -> String {
    date.format(DISPLAY_TIMESTAMP_FORMAT).to_string()
}

/// Parse a display-format timestamp into its calendar date.
pub fn parse_display_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, DISPLAY_TIMESTAMP_FORMAT).map(|dt| dt.date())
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
}
