//! Middleware layer for cross-cutting concerns around the completion client.

use std::sync::Arc;
use std::time::Instant;

use crate::llm::{CompletionClient, LlmError};
use async_trait::async_trait;
use tracing::debug;

/// Wrapper for a [`CompletionClient`] that adds logging and metrics without
/// touching the business logic.
#[derive(Clone)]
pub struct LoggingMiddleware<C: CompletionClient> {
    inner: Arc<C>,
}

impl<C: CompletionClient> LoggingMiddleware<C> {
    pub fn new(client: C) -> Self {
        Self {
            inner: Arc::new(client),
        }
    }
}

#[async_trait]
impl<C: CompletionClient> CompletionClient for LoggingMiddleware<C> {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
        let start = Instant::now();
        debug!(prompt_chars = prompt.len(), "starting completion request");
        metrics::counter!("completion_requests_total").increment(1);

        let result = self.inner.complete(prompt, max_tokens).await;

        let duration = start.elapsed();
        match &result {
            Ok(text) => {
                debug!(?duration, completion_chars = text.len(), "completion succeeded");
            }
            Err(e) => {
                metrics::counter!("completion_failures_total").increment(1);
                debug!(?duration, error = %e, "completion failed");
            }
        }

        result
    }
}
