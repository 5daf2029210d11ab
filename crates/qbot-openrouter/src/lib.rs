//! OpenRouter adapter (chat completions).
//!
//! Sends each prompt as a single-message conversation and relays the first
//! choice. No history, no streaming, no retries.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use qbot_core::{
    config::{DEFAULT_OPENROUTER_BASE_URL, DEFAULT_OPENROUTER_MODEL},
    errors::Error,
    ports::{CompletionClient, CompletionError},
    Result,
};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Clone, Debug)]
pub struct OpenRouterClient {
    api_key: String,
    model: String,
    base_url: String,
    http: reqwest::Client,
}

impl OpenRouterClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let http = builder
            .build()
            .map_err(|e| Error::External(format!("openrouter client build failed: {e}")))?;

        Ok(Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Client against the public endpoint with the default model.
    pub fn with_defaults(api_key: impl Into<String>) -> Result<Self> {
        Self::new(
            api_key,
            DEFAULT_OPENROUTER_MODEL,
            DEFAULT_OPENROUTER_BASE_URL,
            None,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    async fn complete(&self, prompt: &str) -> std::result::Result<String, CompletionError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let resp = self
            .http
            .post(format!("{}/api/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status,
                body: body.chars().take(200).collect(),
            });
        }

        let v: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| CompletionError::Decode(e.to_string()))?;

        first_choice_content(&v)
    }
}

fn first_choice_content(v: &serde_json::Value) -> std::result::Result<String, CompletionError> {
    v.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|t| t.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.to_string())
        .ok_or(CompletionError::MissingContent)
}
