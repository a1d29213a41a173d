//! Client for the text-generation collaborator (OpenAI-compatible chat
//! completions API).
//!
//! The collaborator is best-effort by design: callers must treat every error
//! and every unparsable completion as routine and fall back to the
//! deterministic engine output.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error (status {status}): {body}")]
    Api { status: u16, body: String },
    #[error("completion contained no content")]
    Empty,
}

#[async_trait]
pub trait CompletionClient: Send + Sync + 'static {
    /// Send one user prompt and return the raw completion text.
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError>;
}

/// Chat-completions client using reqwest.
#[derive(Clone, Debug)]
pub struct OpenAiClient {
    base_url: String,
    model: String,
    api_key: SecretString,
    client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(base_url: &str, model: impl Into<String>, api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            client,
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": 0.7,
            "max_tokens": max_tokens,
        });

        let resp = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let body_snippet: String = body.chars().take(256).collect();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body: body_snippet,
            });
        }

        let completion: ChatCompletion = resp.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::Empty)
    }
}

/// Pull a JSON object out of completion text.
///
/// Models wrap their JSON in Markdown fences or surrounding prose often
/// enough that this slices from the first `{` to the last `}` before
/// parsing. Returns `None` unless the slice parses as a JSON object.
pub fn extract_json(text: &str) -> Option<serde_json::Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    let value: serde_json::Value = serde_json::from_str(&text[start..=end]).ok()?;
    value.is_object().then_some(value)
}
