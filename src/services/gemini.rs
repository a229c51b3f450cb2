// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gemini `generateContent` client.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::services::advice::TextGenerator;
use serde::{Deserialize, Serialize};

/// Gemini REST client.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client for one model.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// Create a client from application config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.gemini_base_url.trim_end_matches('/'),
            config.gemini_model.as_str(),
            config.gemini_api_key.as_str(),
        )
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("Gemini rate limit hit (429)");
            }

            return Err(AppError::Upstream(format!(
                "Gemini HTTP {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Gemini JSON parse error: {}", e)))
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Option<String>> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        tracing::debug!(model = %self.model, "Sending prompt to Gemini");

        let response = self
            .http
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        let reply: GenerateResponse = self.check_response_json(response).await?;
        Ok(reply.text())
    }
}

/// A request that could not be built is a local fault; any other send
/// failure means Gemini was unreachable.
fn request_error(err: reqwest::Error) -> AppError {
    if err.is_builder() {
        return anyhow::Error::new(err)
            .context("Failed to build Gemini request")
            .into();
    }
    AppError::Upstream(format!("Gemini request failed: {}", err))
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, if it has any.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_joins_parts() {
        let reply: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Rest "},{"text":"well."}],"role":"model"}}]}"#,
        )
        .unwrap();

        assert_eq!(reply.text().as_deref(), Some("Rest well."));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let reply: GenerateResponse = serde_json::from_str(r#"{"promptFeedback":{}}"#).unwrap();
        assert!(reply.text().is_none());
    }

    #[test]
    fn test_generate_url() {
        let client = GeminiClient::from_config(&Config::test_default());
        assert_eq!(
            client.generate_url(),
            "http://127.0.0.1:9/models/gemini-1.5-flash-002:generateContent"
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_upstream_error() {
        let client = GeminiClient::from_config(&Config::test_default());

        let err = client.generate("hello").await.unwrap_err();

        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_malformed_base_url_is_internal_error() {
        let client = GeminiClient::new("not a url", "gemini-1.5-flash-002", "key");

        let err = client.generate("hello").await.unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
        assert!(!err.is_upstream());
        assert!(err.to_string().contains("Failed to build Gemini request"));
    }
}
