//! Minimal `TerraClient` trait and reqwest-based implementation for the
//! Terra wearable-data aggregation API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod config;
pub mod http_client;
pub mod retry;
pub mod webhook;

#[derive(Debug, Error)]
pub enum TerraError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("authentication rejected: {0}")]
    Auth(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("api error (status {status}): {body}")]
    Api { status: u16, body: String },
}

impl TerraError {
    pub fn from_status(status: u16, body: String) -> Self {
        Self::Api { status, body }
    }

    /// Whether a retry could plausibly succeed. Client-side errors (auth,
    /// not-found, validation) never are.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Api { status, .. } => *status >= 500,
            Self::Config(_) | Self::Auth(_) | Self::NotFound(_) | Self::InvalidInput(_) => false,
        }
    }
}

/// A user registered with the aggregation service. `provider` is the wearable
/// vendor the user connected (OURA, GARMIN, FITBIT, ...).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct TerraUser {
    pub user_id: String,
    pub provider: Option<String>,
    pub last_webhook_update: Option<String>,
}

/// Webhook delivery envelope. `data` carries vendor-normalized records whose
/// exact shape varies per provider, so it stays as raw JSON.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct WebhookPayload {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub user: Option<TerraUser>,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[async_trait]
pub trait TerraClient: Send + Sync + 'static {
    /// Sleep records for a user over the trailing `days_back` days.
    async fn get_sleep(
        &self,
        user_id: &str,
        days_back: Option<u32>,
    ) -> Result<serde_json::Value, TerraError>;

    /// Daily summaries (steps, calories, scores) over the trailing window.
    async fn get_daily(
        &self,
        user_id: &str,
        days_back: Option<u32>,
    ) -> Result<serde_json::Value, TerraError>;

    /// Discrete activity sessions over the trailing window.
    async fn get_activity(
        &self,
        user_id: &str,
        days_back: Option<u32>,
    ) -> Result<serde_json::Value, TerraError>;
}
