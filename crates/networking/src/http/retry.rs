//! Retry policies for the HTTP transport
//!
//! The transport asks the policy how many attempts to make and how long to
//! wait before each one, so a different schedule can be swapped in without
//! touching any caller.

use hoyo_core::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tracing::{error, warn};

/// Attempt budget and pacing for one logical request
pub trait RetryPolicy: Send + Sync {
    /// Total attempts, the first one included
    fn max_attempts(&self) -> u32;

    /// Pause before `attempt` (1-based)
    fn delay_before(&self, attempt: u32) -> Duration;
}

/// `max_retry` immediate retries, no delay
#[derive(Debug, Clone, Copy)]
pub struct FixedRetry {
    pub max_retry: u32,
}

impl FixedRetry {
    pub fn new(max_retry: u32) -> Self {
        Self { max_retry }
    }
}

impl Default for FixedRetry {
    fn default() -> Self {
        Self { max_retry: 2 }
    }
}

impl RetryPolicy for FixedRetry {
    fn max_attempts(&self) -> u32 {
        self.max_retry.saturating_add(1)
    }

    fn delay_before(&self, _attempt: u32) -> Duration {
        Duration::ZERO
    }
}

/// Doubling delay between retries, capped at `max_delay`
#[derive(Debug, Clone, Copy)]
pub struct ExponentialBackoff {
    pub max_retry: u32,
    pub base: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy for ExponentialBackoff {
    fn max_attempts(&self) -> u32 {
        self.max_retry.saturating_add(1)
    }

    fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        let factor = 1u32.checked_shl(attempt - 2).unwrap_or(u32::MAX);
        self.base.saturating_mul(factor).min(self.max_delay)
    }
}

/// Run `op` until it succeeds or the policy's attempts are used up.
///
/// `op` receives the 1-based attempt number. The terminal error reports how
/// many attempts were made and the last failure.
pub async fn run_with_retry<P, F, Fut, T>(policy: &P, label: &str, mut op: F) -> Result<T>
where
    P: RetryPolicy + ?Sized,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let attempts = policy.max_attempts().max(1);
    let mut last_error = String::new();

    for attempt in 1..=attempts {
        let delay = policy.delay_before(attempt);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                warn!("{} failed (attempt {}/{}): {}", label, attempt, attempts, e);
                last_error = e.to_string();
            }
        }
    }

    error!("{}: all {} attempts failed", label, attempts);
    Err(Error::RetriesExhausted {
        attempts,
        last_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_fault_on_every_attempt_exhausts_budget() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = run_with_retry(&FixedRetry::new(2), "test", |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(Error::NetworkError("connection reset".into())) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        match result {
            Err(Error::RetriesExhausted {
                attempts,
                last_error,
            }) => {
                assert_eq!(attempts, 3);
                assert!(last_error.contains("connection reset"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_success_on_last_attempt_is_returned() {
        let calls = AtomicU32::new(0);
        let result = run_with_retry(&FixedRetry::new(2), "test", |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 3 {
                    Err(Error::HttpStatus { status: 502 })
                } else {
                    Ok(format!("body from attempt {}", attempt))
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(result, "body from attempt 3");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_retries_means_single_attempt() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = run_with_retry(&FixedRetry::new(0), "test", |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(Error::HttpStatus { status: 500 }) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(
            result,
            Err(Error::RetriesExhausted { attempts: 1, .. })
        ));
    }

    #[test]
    fn test_fixed_retry_never_waits() {
        let policy = FixedRetry::default();
        assert_eq!(policy.max_attempts(), 3);
        assert!((1..=3).all(|a| policy.delay_before(a).is_zero()));
    }

    #[test]
    fn test_exponential_backoff_schedule() {
        let policy = ExponentialBackoff {
            max_retry: 4,
            base: Duration::from_millis(100),
            max_delay: Duration::from_millis(350),
        };
        assert_eq!(policy.max_attempts(), 5);
        assert_eq!(policy.delay_before(1), Duration::ZERO);
        assert_eq!(policy.delay_before(2), Duration::from_millis(100));
        assert_eq!(policy.delay_before(3), Duration::from_millis(200));
        assert_eq!(policy.delay_before(4), Duration::from_millis(350));
        assert_eq!(policy.delay_before(40), Duration::from_millis(350));
    }
}
