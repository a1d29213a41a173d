//! HTTP client implementation for the Terra API.
//!
//! This module provides a reqwest-based implementation of the
//! [`TerraClient`](crate::TerraClient) trait.

use crate::retry::RetryPolicy;
use crate::{TerraClient, TerraError};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

/// Client for the Terra API using reqwest.
///
/// Authentication is header-based: every request carries the `dev-id` and
/// `x-api-key` pair issued with the developer account.
#[derive(Clone, Debug)]
pub struct ReqwestTerraClient {
    base_url: String,
    dev_id: String,
    api_key: SecretString,
    client: reqwest::Client,
    retry: Arc<RetryPolicy>,
}

impl ReqwestTerraClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the Terra API (e.g., "https://api.tryterra.co")
    /// * `dev_id` - Developer ID for authentication
    /// * `api_key` - API key for authentication
    pub fn new(base_url: &str, dev_id: impl Into<String>, api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            dev_id: dev_id.into(),
            api_key,
            client,
            retry: Arc::new(RetryPolicy::default()),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Arc::new(retry);
        self
    }

    /// Build an authenticated GET request.
    fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header("dev-id", &self.dev_id)
            .header("x-api-key", self.api_key.expose_secret())
    }

    /// Fetch a data endpoint for one user over a trailing date window,
    /// retrying transient failures.
    async fn fetch_window(
        &self,
        endpoint: &str,
        user_id: &str,
        days_back: Option<u32>,
    ) -> Result<serde_json::Value, TerraError> {
        let url = format!("{}/v2/{}", self.base_url, endpoint);
        let (start_date, end_date) = date_window(days_back.unwrap_or(7));

        tracing::debug!(endpoint, user_id, %start_date, %end_date, "fetching terra data");
        metrics::counter!("terra_api_requests_total", "endpoint" => endpoint.to_string())
            .increment(1);

        self.retry
            .run(|| async {
                let resp = self
                    .get_request(&url)
                    .query(&[
                        ("user_id", user_id),
                        ("start_date", start_date.as_str()),
                        ("end_date", end_date.as_str()),
                    ])
                    .send()
                    .await?;
                self.handle_response(resp).await
            })
            .await
    }

    /// Handle a response, converting status codes to appropriate errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, TerraError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(self.error_from_response(resp).await);
        }
        Ok(resp.json::<T>().await?)
    }

    /// Extract error information from a failed response.
    async fn error_from_response(&self, resp: reqwest::Response) -> TerraError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let body_snippet: String = body.chars().take(256).collect();

        match status {
            404 => TerraError::NotFound(body_snippet),
            401 | 403 => TerraError::Auth(body_snippet),
            422 => TerraError::InvalidInput(body_snippet),
            _ => TerraError::from_status(status, body_snippet),
        }
    }
}

/// Trailing date window ending today, formatted the way the API expects.
fn date_window(days_back: u32) -> (String, String) {
    let today = Utc::now().date_naive();
    let oldest = today - Duration::days(i64::from(days_back));
    (oldest.to_string(), today.to_string())
}

#[async_trait]
impl TerraClient for ReqwestTerraClient {
    async fn get_sleep(
        &self,
        user_id: &str,
        days_back: Option<u32>,
    ) -> Result<serde_json::Value, TerraError> {
        self.fetch_window("sleep", user_id, days_back).await
    }

    async fn get_daily(
        &self,
        user_id: &str,
        days_back: Option<u32>,
    ) -> Result<serde_json::Value, TerraError> {
        self.fetch_window("daily", user_id, days_back).await
    }

    async fn get_activity(
        &self,
        user_id: &str,
        days_back: Option<u32>,
    ) -> Result<serde_json::Value, TerraError> {
        self.fetch_window("activity", user_id, days_back).await
    }
}
