// =============================================================================
// OPENAI MODERATION CLIENT
// =============================================================================
//
// Implements `ModerationClient` against the OpenAI Moderations endpoint
// (`POST /v1/moderations`).
//
// **Request:** `{"input": "<text>", "model": "<optional>"}` with a Bearer key.
// **Response:** `{"results": [{"flagged": bool, "categories": {...}, ...}]}`.
//
// Only `results[0].flagged` decides anything. A response without it is a
// malformed response, never an approval.
//
// **Environment Variables:**
// - `OPENAI_API_KEY` - API key
// - `OPENAI_BASE_URL` - Override for proxies or test servers
// - `OPENAI_MODERATION_MODEL` - e.g. `omni-moderation-latest`

use crate::core::moderation::{ModerationClient, ModerationError, ModerationVerdict};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiModerationClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: Option<String>,
}

impl OpenAiModerationClient {
    #[allow(dead_code)]
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string(), None)
    }

    pub fn with_base_url(api_key: String, base_url: String, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/moderations", self.base_url)
    }

    fn payload(&self, text: &str) -> serde_json::Value {
        let mut payload = json!({ "input": text });
        if let Some(model) = &self.model {
            payload["model"] = json!(model);
        }
        payload
    }

    /// Extract the verdict for the first (and only) input.
    fn parse_verdict(body: &serde_json::Value) -> Result<ModerationVerdict, ModerationError> {
        let first = body["results"]
            .as_array()
            .and_then(|results| results.first())
            .ok_or_else(|| ModerationError::MalformedResponse("missing results".to_string()))?;

        let flagged = first["flagged"].as_bool().ok_or_else(|| {
            ModerationError::MalformedResponse("results[0].flagged is not a boolean".to_string())
        })?;

        Ok(ModerationVerdict {
            flagged,
            categories: first
                .get("categories")
                .cloned()
                .unwrap_or(serde_json::Value::Null),
        })
    }
}

#[async_trait]
impl ModerationClient for OpenAiModerationClient {
    async fn classify(&self, text: &str) -> Result<ModerationVerdict, ModerationError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&self.payload(text))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ModerationError::Api { status, body });
        }

        let body: serde_json::Value = response.json().await?;
        let verdict = Self::parse_verdict(&body)?;

        tracing::debug!(flagged = verdict.flagged, "OpenAI moderation completed");

        Ok(verdict)
    }
}

// =============================================================================
// TESTS
// =============================================================================
