use crate::TerraError;
use rand::{RngExt, rng};
use std::time::Duration;

/// A simple retry policy with exponential backoff and jitter.
///
/// Only errors reporting themselves as retryable (network failures, 5xx) are
/// replayed; client-side errors surface immediately.
#[derive(Debug)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    pub async fn run<F, Fut, T>(&self, mut f: F) -> Result<T, TerraError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, TerraError>>,
    {
        let mut attempt = 0u32;
        loop {
            match f().await {
                Ok(v) => return Ok(v),
                Err(e) => {
                    attempt += 1;
                    if attempt > self.max_retries || !e.is_retryable() {
                        return Err(e);
                    }
                    // exponential backoff with jitter
                    let max_delay = self.base_delay * (1u32 << attempt);
                    let jitter = {
                        let mut rng = rng();
                        rng.random_range(0..max_delay.as_millis() as u64)
                    };
                    let delay = Duration::from_millis(jitter.min(max_delay.as_millis() as u64));
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
