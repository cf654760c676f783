//! Exponential-backoff retry for provider HTTP calls.
//!
//! Only HTTP 429 and transport errors are retried; any other failure
//! propagates immediately. Exhausting the budget surfaces the last
//! failure kind (`RateLimited` or `Network`) to the caller.

use std::future::Future;
use std::time::Duration;

use crate::error::ProviderError;

/// Tunable parameters for the backoff strategy.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Delay before the first retry; doubles on each subsequent attempt.
    pub base_delay: Duration,
    /// Number of retries after the initial attempt.
    pub max_retries: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(500),
            max_retries: 3,
        }
    }
}

/// Delay before retry number `attempt` (0-based): `base * 2^attempt`.
pub fn backoff_delay(config: &RetryConfig, attempt: u32) -> Duration {
    config.base_delay * 2u32.saturating_pow(attempt)
}

/// Transient failure classification used by [`with_retry`].
#[derive(Debug)]
pub enum Transient {
    RateLimited,
    Network(reqwest::Error),
}

/// Run `op` with exponential backoff on transient failures.
///
/// `op` returns `Ok(value)`, `Err(Ok(transient))` for a retryable
/// failure, or `Err(Err(fatal))` to abort immediately.
pub async fn with_retry<T, F, Fut>(config: &RetryConfig, mut op: F) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, Result<Transient, ProviderError>>>,
{
    let mut attempt = 0u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(Err(fatal)) => return Err(fatal),
            Err(Ok(transient)) => {
                if attempt >= config.max_retries {
                    return Err(match transient {
                        Transient::RateLimited => ProviderError::RateLimited {
                            attempts: attempt + 1,
                        },
                        Transient::Network(e) => ProviderError::Network(e),
                    });
                }
                let delay = backoff_delay(config, attempt);
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    transient = ?transient,
                    "Provider request failed, backing off",
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn config(base_ms: u64, retries: u32) -> RetryConfig {
        RetryConfig {
            base_delay: Duration::from_millis(base_ms),
            max_retries: retries,
        }
    }

    // -- backoff_delay --------------------------------------------------------

    #[test]
    fn delay_doubles_per_attempt() {
        let c = config(500, 5);
        assert_eq!(backoff_delay(&c, 0), Duration::from_millis(500));
        assert_eq!(backoff_delay(&c, 1), Duration::from_millis(1000));
        assert_eq!(backoff_delay(&c, 2), Duration::from_millis(2000));
        assert_eq!(backoff_delay(&c, 3), Duration::from_millis(4000));
    }

    // -- with_retry -----------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn succeeds_without_retry() {
        let calls = AtomicU32::new(0);
        let result: Result<i32, _> = with_retry(&config(10, 3), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(42) }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn retries_transient_until_success() {
        let calls = AtomicU32::new(0);
        let result: Result<i32, _> = with_retry(&config(10, 3), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(Ok(Transient::RateLimited))
                } else {
                    Ok(7)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_reports_rate_limited_with_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<i32, _> = with_retry(&config(10, 2), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(Ok(Transient::RateLimited)) }
        })
        .await;
        assert_matches!(result, Err(ProviderError::RateLimited { attempts: 3 }));
        // initial attempt + 2 retries
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn fatal_error_aborts_immediately() {
        let calls = AtomicU32::new(0);
        let result: Result<i32, _> = with_retry(&config(10, 3), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(Err(ProviderError::Api {
                    status: 500,
                    body: "boom".into(),
                }))
            }
        })
        .await;
        assert_matches!(result, Err(ProviderError::Api { status: 500, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
