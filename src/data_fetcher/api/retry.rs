//! Bounded retry for single-attempt operations.
//!
//! Only transient failures (unreachable host, timeout) are retried. The wait
//! before retry `n` is `base_delay * n`: it grows linearly, 2s then 4s with
//! the defaults.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::constants::retry::{BASE_DELAY_MS, MAX_ATTEMPTS};
use crate::error::FetchError;

/// Retry budget as stored in the config file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total attempts, including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Base delay between attempts in milliseconds
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    MAX_ATTEMPTS
}

fn default_base_delay_ms() -> u64 {
    BASE_DELAY_MS
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// A budget of zero attempts is treated as one.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, Duration::from_millis(config.base_delay_ms))
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Wait after the failed attempt with 0-based index `attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt.saturating_add(1))
    }

    /// Runs `operation` until it succeeds, fails terminally, or the budget
    /// runs out. The operation receives the 0-based attempt index.
    ///
    /// Dropping the returned future during a wait abandons the remaining
    /// attempts.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, FetchError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let mut attempt = 0u32;
        loop {
            match operation(attempt).await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!("Succeeded on attempt {}/{}", attempt + 1, self.max_attempts);
                    }
                    return Ok(value);
                }
                Err(e) if e.is_transient() && attempt + 1 < self.max_attempts => {
                    let wait = self.delay_for(attempt);
                    warn!(
                        "Transient failure: {}. Retrying in {:?} (attempt {}/{})",
                        e,
                        wait,
                        attempt + 1,
                        self.max_attempts
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                Err(e) => {
                    if e.is_transient() {
                        warn!("Giving up after {} attempts: {}", self.max_attempts, e);
                    }
                    return Err(e);
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::time::Instant;

    fn policy() -> RetryPolicy {
        RetryPolicy::new(3, Duration::from_millis(2000))
    }

    #[test]
    fn test_delay_grows_linearly() {
        let policy = policy();
        assert_eq!(policy.delay_for(0), Duration::from_millis(2000));
        assert_eq!(policy.delay_for(1), Duration::from_millis(4000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(6000));
    }

    #[test]
    fn test_zero_attempts_means_one() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failures_wait_between_attempts() {
        let start = Instant::now();
        let calls = Mutex::new(Vec::new());

        let result: Result<(), FetchError> = policy()
            .run(|_| {
                calls.lock().unwrap().push(start.elapsed());
                async { Err(FetchError::timeout("https://api.example.com")) }
            })
            .await;

        assert_eq!(result, Err(FetchError::timeout("https://api.example.com")));
        assert_eq!(
            *calls.lock().unwrap(),
            vec![
                Duration::ZERO,
                Duration::from_millis(2000),
                Duration::from_millis(6000),
            ]
        );
        // No wait after the final attempt
        assert_eq!(start.elapsed(), Duration::from_millis(6000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_transient_failure() {
        let result = policy()
            .run(|attempt| async move {
                if attempt == 0 {
                    Err(FetchError::network_unavailable("https://x", "refused"))
                } else {
                    Ok(attempt)
                }
            })
            .await;

        assert_eq!(result, Ok(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_failure_is_not_retried() {
        let start = Instant::now();
        let mut attempts = 0;

        let result: Result<(), FetchError> = policy()
            .run(|_| {
                attempts += 1;
                async { Err(FetchError::http_error(500, "https://x")) }
            })
            .await;

        assert_eq!(result, Err(FetchError::http_error(500, "https://x")));
        assert_eq!(attempts, 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_then_terminal_stops_immediately() {
        let mut attempts = 0;

        let result: Result<(), FetchError> = policy()
            .run(|attempt| {
                attempts += 1;
                async move {
                    if attempt == 0 {
                        Err(FetchError::timeout("https://x"))
                    } else {
                        Err(FetchError::malformed_response("bad", "https://x"))
                    }
                }
            })
            .await;

        assert!(matches!(result, Err(FetchError::MalformedResponse { .. })));
        assert_eq!(attempts, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_during_wait_cancels_remaining_attempts() {
        let calls = Mutex::new(0);
        let policy = policy();
        let run = policy.run(|_| {
            *calls.lock().unwrap() += 1;
            async { Err::<(), _>(FetchError::timeout("https://x")) }
        });

        let outcome = tokio::time::timeout(Duration::from_millis(1000), run).await;

        assert!(outcome.is_err());
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_retry_config_defaults_from_toml() {
        let config: RetryConfig = toml::from_str("max_attempts = 5").unwrap();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.base_delay_ms, 2000);
    }
}
