// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Loaded once at startup; the Gemini API key is the only required value.

use std::env;

/// Default Gemini model used for advice and feedback.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-002";

/// Default Gemini REST endpoint.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Illustrative image that may accompany workout advice.
pub const DEFAULT_ADVICE_IMAGE_URL: &str = "https://plus.unsplash.com/premium_photo-1669048780129-051d670fa2d1?q=80&w=3870&auto=format&fit=crop";

/// Number of friends' posts shown on the community page.
pub const DEFAULT_COMMUNITY_FEED_LIMIT: u32 = 10;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Gemini model name
    pub gemini_model: String,
    /// Gemini REST endpoint (overridable for tests and proxies)
    pub gemini_base_url: String,
    /// Image URL offered alongside workout advice
    pub advice_image_url: String,
    /// Maximum number of posts in the community feed
    pub community_feed_limit: u32,

    // --- Secrets ---
    /// Gemini API key
    pub gemini_api_key: String,
}

impl Config {
    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: "http://127.0.0.1:9".to_string(),
            advice_image_url: DEFAULT_ADVICE_IMAGE_URL.to_string(),
            community_feed_limit: DEFAULT_COMMUNITY_FEED_LIMIT,
            gemini_api_key: "test_gemini_key".to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file is honoured for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
            advice_image_url: env::var("ADVICE_IMAGE_URL")
                .unwrap_or_else(|_| DEFAULT_ADVICE_IMAGE_URL.to_string()),
            community_feed_limit: match env::var("COMMUNITY_FEED_LIMIT") {
                Ok(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("COMMUNITY_FEED_LIMIT", raw))?,
                Err(_) => DEFAULT_COMMUNITY_FEED_LIMIT,
            },

            gemini_api_key: env::var("GEMINI_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GEMINI_API_KEY"))?,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Env vars are process-global, so all cases live in one test.
        env::set_var("GEMINI_API_KEY", " test_key ");
        env::set_var("COMMUNITY_FEED_LIMIT", "5");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.gemini_api_key, "test_key");
        assert_eq!(config.community_feed_limit, 5);
        assert_eq!(config.port, 8080);

        env::set_var("COMMUNITY_FEED_LIMIT", "lots");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid("COMMUNITY_FEED_LIMIT", _)
        ));

        env::remove_var("COMMUNITY_FEED_LIMIT");
        env::remove_var("GEMINI_API_KEY");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Missing("GEMINI_API_KEY")));
    }
}
