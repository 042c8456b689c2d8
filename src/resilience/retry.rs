use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::client::ApiError;
use crate::config::RetryConfig;

/// Backoff/retry specification for outbound upstream calls
///
/// `max_attempts` counts retries after the initial attempt, so a policy of
/// 3 tolerates three retryable failures before the fourth is returned to
/// the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            backoff: Duration::from_millis(config.backoff_ms),
        }
    }

    /// Per-call-site override of the attempt budget
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Per-call-site override of the backoff delay
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

/// Apply a retry policy to a fallible async operation
///
/// Failures the predicate accepts are retried after the policy's backoff
/// delay until the attempt budget is spent; the final failure is returned
/// as-is, never wrapped, so callers see the same error type an unretried
/// call would produce. Failures the predicate rejects propagate on first
/// occurrence.
pub async fn call_with_retry<F, Fut, T, E>(
    policy: RetryPolicy,
    retryable: impl Fn(&E) -> bool,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt: u32 = 0;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt < policy.max_attempts && retryable(&error) => {
                attempt += 1;
                warn!(
                    attempt = attempt,
                    max_attempts = policy.max_attempts,
                    backoff_ms = policy.backoff.as_millis() as u64,
                    error = %error,
                    "Retryable upstream failure, backing off"
                );
                tokio::time::sleep(policy.backoff).await;
            }
            Err(error) => return Err(error),
        }
    }
}

/// Retry an upstream API call using the standard retryable classification
pub async fn call_api_with_retry<F, Fut, T>(
    policy: RetryPolicy,
    operation: F,
) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    call_with_retry(policy, ApiError::is_retryable, operation).await
}
