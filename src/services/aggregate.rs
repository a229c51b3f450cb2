// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Aggregation over canonical records: flat totals, per-day totals over a
//! trailing window, and chart series.

use crate::models::{
    DailyMacroSummary, MacroTotals, MealEntry, Workout, WorkoutChartPoint, WorkoutSummary,
};
use crate::time_utils::DATE_FORMAT;
use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;

/// Length of the weekly meal summary window, in days.
pub const WEEKLY_WINDOW_DAYS: u32 = 7;

/// Number of workouts shown in the "recent workouts" panel.
pub const RECENT_WORKOUTS_SHOWN: usize = 3;

/// Sum distance, steps and calories across workouts.
pub fn summarize_workouts(workouts: &[Workout]) -> WorkoutSummary {
    workouts.iter().fold(WorkoutSummary::default(), |mut acc, w| {
        acc.add(w);
        acc
    })
}

/// Sum calories and macros across meals.
pub fn summarize_meals(meals: &[MealEntry]) -> MacroTotals {
    meals.iter().fold(MacroTotals::default(), |mut acc, m| {
        acc.add(m);
        acc
    })
}

/// Totals for a day's meals, or `None` when no meal carries a calorie value.
///
/// Mirrors a SQL `SUM` over the day: no rows, or only null calories, is an
/// absent total rather than zero.
pub fn day_totals(meals: &[MealEntry]) -> Option<MacroTotals> {
    if meals.iter().all(|m| m.calories.is_none()) {
        return None;
    }
    Some(summarize_meals(meals))
}

/// Inclusive window of `days` days ending at `today`.
///
/// A zero-length request is treated as a one-day window.
pub fn trailing_window(today: NaiveDate, days: u32) -> (NaiveDate, NaiveDate) {
    let back = u64::from(days.max(1) - 1);
    let start = today.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN);
    (start, today)
}

/// Per-day macro totals for the trailing window ending at `today`.
///
/// One row per day that has at least one meal, in ascending date order.
/// Meals outside the window or without a date are ignored.
pub fn daily_macro_totals(
    meals: &[MealEntry],
    today: NaiveDate,
    days: u32,
) -> Vec<DailyMacroSummary> {
    let (start, end) = trailing_window(today, days);

    let mut by_day: BTreeMap<NaiveDate, MacroTotals> = BTreeMap::new();
    for meal in meals {
        let Some(date) = meal.date else { continue };
        if date < start || date > end {
            continue;
        }
        by_day.entry(date).or_default().add(meal);
    }

    by_day
        .into_iter()
        .map(|(date, totals)| DailyMacroSummary {
            date: date.format(DATE_FORMAT).to_string(),
            total_calories: totals.total_calories,
            total_protein: totals.total_protein,
            total_fats: totals.total_fats,
            total_carbs: totals.total_carbs,
        })
        .collect()
}

/// The most recent record from a store query already sorted newest first.
///
/// Ties keep the store's order, so this is simply the first row.
pub fn most_recent<T>(rows: impl IntoIterator<Item = T>) -> Option<T> {
    rows.into_iter().next()
}

/// Distance and step series, one labelled point per workout.
pub fn workout_chart(workouts: &[Workout]) -> Vec<WorkoutChartPoint> {
    workouts
        .iter()
        .enumerate()
        .map(|(i, w)| WorkoutChartPoint {
            label: format!("Workout {}", i + 1),
            distance: w.distance.unwrap_or(0.0),
            steps: w.steps.unwrap_or(0),
        })
        .collect()
}
