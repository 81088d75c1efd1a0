// src/provider/retry.rs — Bounded retry for completion attempts
//
// An "attempt" covers the provider call and parsing of its output, so a
// response without a usable color is retried the same way as a transport
// failure. Validation and store errors are never retried.

use std::future::Future;
use std::time::Duration;

use crate::infra::config::CompletionConfig;
use crate::infra::errors::TinctureError;

/// Configuration for retry behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Extra attempts after the first failure.
    pub max_retries: u32,
    /// Fixed pause between attempts.
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 1,
            delay: Duration::ZERO,
        }
    }
}

impl RetryConfig {
    pub fn from_completion(config: &CompletionConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

/// Run `op` until it succeeds, a non-retriable error occurs, or attempts run out.
///
/// `op` receives the zero-based attempt number. The last error is returned.
pub async fn with_retry<T, F, Fut>(
    config: &RetryConfig,
    label: &str,
    mut op: F,
) -> Result<T, TinctureError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, TinctureError>>,
{
    let mut attempt = 0;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if !e.is_retriable() || attempt >= config.max_retries {
                    if attempt > 0 {
                        tracing::warn!(
                            attempt = attempt + 1,
                            max_attempts = config.max_attempts(),
                            "{label}: giving up: {e}"
                        );
                    }
                    return Err(e);
                }

                tracing::warn!(
                    attempt = attempt + 1,
                    max_attempts = config.max_attempts(),
                    delay_ms = config.delay.as_millis() as u64,
                    "{label}: retrying after error: {e}"
                );

                if !config.delay.is_zero() {
                    tokio::time::sleep(config.delay).await;
                }
                attempt += 1;
            }
        }
    }
}
