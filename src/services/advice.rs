// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout advice and nutrition feedback.
//!
//! Each request ends in exactly one of two branches:
//! - **No data**: a fixed fallback message, no image, and no call to the
//!   generative model.
//! - **Generate**: a prompt built from the metrics is sent to the model; an
//!   empty reply falls back to a fixed "could not generate" message.
//!
//! Transport failures from the model are returned as errors, never replaced
//! by a fallback message.

use crate::error::Result;
use crate::models::{AdviceResult, MacroTotals, Workout};
use crate::time_utils::format_utc_rfc3339;
use chrono::Utc;
use rand::seq::SliceRandom;
use std::fmt::Display;
use std::future::Future;

pub const NO_WORKOUT_MESSAGE: &str = "No recent workout data found.";
pub const NO_NUTRITION_MESSAGE: &str = "No nutrition data found for today. Try logging your meals!";
pub const ADVICE_FAILED_MESSAGE: &str = "Could not generate advice.";
pub const FEEDBACK_FAILED_MESSAGE: &str = "Could not generate feedback.";

/// Generative-text capability.
pub trait TextGenerator: Send + Sync {
    /// Generate text for a prompt. `Ok(None)` means the model answered with
    /// no usable text.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<Option<String>>> + Send;
}

/// Builds advice and feedback results around a [`TextGenerator`].
#[derive(Clone)]
pub struct AdviceGenerator<G> {
    generator: G,
    image_url: String,
}

impl<G: TextGenerator> AdviceGenerator<G> {
    /// `image_url` is the illustrative image occasionally attached to advice.
    pub fn new(generator: G, image_url: impl Into<String>) -> Self {
        Self {
            generator,
            image_url: image_url.into(),
        }
    }

    /// Fitness advice for the user's most recent workout.
    pub async fn workout_advice(&self, latest: Option<&Workout>) -> Result<AdviceResult> {
        let Some(workout) = latest else {
            tracing::info!("No recent workout, returning fallback advice");
            return Ok(build_result(NO_WORKOUT_MESSAGE.to_string(), None));
        };

        let prompt = workout_prompt(workout);
        let content = self.complete(&prompt, ADVICE_FAILED_MESSAGE).await?;

        Ok(build_result(content, self.pick_image()))
    }

    /// Nutrition feedback for today's totals.
    ///
    /// `None` totals means no meal with a calorie value was logged today.
    pub async fn nutrition_feedback(&self, totals: Option<&MacroTotals>) -> Result<AdviceResult> {
        let Some(totals) = totals else {
            tracing::info!("No nutrition data for today, returning fallback feedback");
            return Ok(build_result(NO_NUTRITION_MESSAGE.to_string(), None));
        };

        let prompt = nutrition_prompt(totals);
        let content = self.complete(&prompt, FEEDBACK_FAILED_MESSAGE).await?;

        Ok(build_result(content, None))
    }

    async fn complete(&self, prompt: &str, fallback: &str) -> Result<String> {
        let text = self.generator.generate(prompt).await?;

        match text {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => {
                tracing::warn!("Model returned no text, using fallback");
                Ok(fallback.to_string())
            }
        }
    }

    /// Attach the image or not, with equal odds.
    fn pick_image(&self) -> Option<String> {
        let choices = [Some(self.image_url.as_str()), None];
        choices
            .choose(&mut rand::thread_rng())
            .copied()
            .flatten()
            .map(str::to_string)
    }
}

fn build_result(content: String, image: Option<String>) -> AdviceResult {
    AdviceResult {
        id: uuid::Uuid::new_v4().to_string(),
        timestamp: format_utc_rfc3339(Utc::now()),
        content,
        image,
    }
}

fn or_unknown<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| v.to_string())
}

/// Prompt for advice about a single workout.
pub fn workout_prompt(workout: &Workout) -> String {
    format!(
        "Based on a workout where the user covered {} km, took {} steps, and burned {} calories, \
         give a brief fitness advice on recovery, future training, or improvements.",
        or_unknown(workout.distance),
        or_unknown(workout.steps),
        or_unknown(workout.calories_burned),
    )
}

/// Prompt for feedback about a day's calorie and macro intake.
pub fn nutrition_prompt(totals: &MacroTotals) -> String {
    format!(
        "Today, the user consumed:\n\
         - Calories: {} kcal\n\
         - Protein: {} g\n\
         - Fats: {} g\n\
         - Carbohydrates: {} g\n\n\
         Provide brief, personalized nutrition feedback. Suggest improvements, assess balance, \
         and be encouraging. Compare to average adult dietary recommendations.",
        totals.total_calories, totals.total_protein, totals.total_fats, totals.total_carbs,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct FixedGenerator {
        reply: Option<String>,
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::Upstream("model offline".to_string()));
            }
            Ok(self.reply.clone())
        }
    }

    fn workout() -> Workout {
        Workout {
            workout_id: "workout1".to_string(),
            start_timestamp: Some("2024-07-29 07:00:00".to_string()),
            end_timestamp: Some("2024-07-29 08:00:00".to_string()),
            start_lat_lng: None,
            end_lat_lng: None,
            distance: Some(5.5),
            steps: Some(7200),
            calories_burned: None,
        }
    }

    #[test]
    fn test_workout_prompt_embeds_metrics() {
        let prompt = workout_prompt(&workout());

        assert!(prompt.contains("covered 5.5 km"));
        assert!(prompt.contains("took 7200 steps"));
        assert!(prompt.contains("burned unknown calories"));
    }

    #[test]
    fn test_nutrition_prompt_embeds_totals_verbatim() {
        let totals = MacroTotals {
            total_calories: 1850.0,
            total_protein: 92.5,
            total_fats: 61.0,
            total_carbs: 210.25,
        };

        let prompt = nutrition_prompt(&totals);

        assert!(prompt.contains("Calories: 1850 kcal"));
        assert!(prompt.contains("Protein: 92.5 g"));
        assert!(prompt.contains("Fats: 61 g"));
        assert!(prompt.contains("Carbohydrates: 210.25 g"));
    }

    #[tokio::test]
    async fn test_no_workout_skips_model() {
        let generator = FixedGenerator::default();
        let advice = AdviceGenerator::new(generator.clone(), "https://example.com/a.jpg");

        let result = advice.workout_advice(None).await.unwrap();

        assert_eq!(result.content, NO_WORKOUT_MESSAGE);
        assert!(result.image.is_none());
        assert!(uuid::Uuid::parse_str(&result.id).is_ok());
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_reply_uses_fallback() {
        let generator = FixedGenerator {
            reply: Some("   ".to_string()),
            ..Default::default()
        };
        let advice = AdviceGenerator::new(generator, "https://example.com/a.jpg");

        let result = advice.workout_advice(Some(&workout())).await.unwrap();

        assert_eq!(result.content, ADVICE_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_image_is_configured_url_or_none() {
        let generator = FixedGenerator {
            reply: Some("Stretch.".to_string()),
            ..Default::default()
        };
        let advice = AdviceGenerator::new(generator, "https://example.com/a.jpg");

        for _ in 0..20 {
            let result = advice.workout_advice(Some(&workout())).await.unwrap();
            assert_eq!(result.content, "Stretch.");
            if let Some(image) = result.image {
                assert_eq!(image, "https://example.com/a.jpg");
            }
        }
    }

    #[tokio::test]
    async fn test_nutrition_feedback_has_no_image() {
        let generator = FixedGenerator {
            reply: Some("Eat more greens.".to_string()),
            ..Default::default()
        };
        let advice = AdviceGenerator::new(generator, "https://example.com/a.jpg");

        let result = advice
            .nutrition_feedback(Some(&MacroTotals::default()))
            .await
            .unwrap();

        assert_eq!(result.content, "Eat more greens.");
        assert!(result.image.is_none());
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let generator = FixedGenerator {
            fail: true,
            ..Default::default()
        };
        let advice = AdviceGenerator::new(generator, "https://example.com/a.jpg");

        let err = advice
            .nutrition_feedback(Some(&MacroTotals::default()))
            .await
            .unwrap_err();

        assert!(err.is_upstream());
    }
}
