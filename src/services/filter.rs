// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Inclusive day-range filtering of time-stamped records.

use crate::models::Workout;
use crate::time_utils::parse_display_date;
use chrono::NaiveDate;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A record with a display-format start timestamp.
pub trait Timestamped {
    /// Identifier used when reporting a malformed timestamp.
    fn record_id(&self) -> &str;
    /// Start timestamp in `YYYY-MM-DD HH:MM:SS` format.
    fn start_timestamp(&self) -> Option<&str>;
}

impl Timestamped for Workout {
    fn record_id(&self) -> &str {
        &self.workout_id
    }

    fn start_timestamp(&self) -> Option<&str> {
        self.start_timestamp.as_deref()
    }
}

/// A record skipped because its timestamp could not be parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FilterWarning {
    pub record_id: String,
    pub timestamp: String,
    pub message: String,
}

/// Records kept by the filter plus any per-record warnings.
#[derive(Debug, Clone)]
pub struct FilterOutcome<T> {
    pub records: Vec<T>,
    pub warnings: Vec<FilterWarning>,
}

/// Keep records whose start date lies in `start..=end`, preserving order.
///
/// An inverted range yields nothing. Records without a start timestamp are
/// dropped silently; records with an unparseable one are dropped and reported.
pub fn filter_by_date_range<T: Timestamped>(
    records: Vec<T>,
    start: NaiveDate,
    end: NaiveDate,
) -> FilterOutcome<T> {
    let mut outcome = FilterOutcome {
        records: Vec::new(),
        warnings: Vec::new(),
    };

    if end < start {
        tracing::debug!(%start, %end, "Inverted date range, nothing to keep");
        return outcome;
    }

    for record in records {
        let Some(raw) = record.start_timestamp() else {
            continue;
        };

        match parse_display_date(raw) {
            Ok(day) if start <= day && day <= end => outcome.records.push(record),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(
                    record_id = record.record_id(),
                    timestamp = raw,
                    error = %e,
                    "Invalid timestamp format, skipping record"
                );
                outcome.warnings.push(FilterWarning {
                    record_id: record.record_id().to_string(),
                    timestamp: raw.to_string(),
                    message: format!("Invalid timestamp format: {}", raw),
                });
            }
        }
    }

    outcome
}
