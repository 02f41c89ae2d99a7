//! Explicit retry policy with exponential backoff
//!
//! Failures of individual attempts are logged and swallowed; the caller gets
//! either the first success or `Exhausted` carrying the last error.

#![allow(async_fn_in_trait)]

use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::error::{Result, VersioningError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Delay before the second attempt; 0 retries immediately
    pub initial_delay_ms: u32,
    /// Factor applied to the delay after every failed retry
    pub multiplier: f64,
    /// Upper bound for a single delay
    pub max_delay_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay_ms: 100,
            multiplier: 2.0,
            max_delay_ms: 2_000,
        }
    }
}

impl RetryPolicy {
    /// Retry immediately, no delay between attempts
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(VersioningError::Config("retry.maxAttempts must be at least 1".into()));
        }
        if !(self.multiplier >= 1.0) {
            return Err(VersioningError::Config("retry.multiplier must be at least 1".into()));
        }
        Ok(())
    }

    /// Delay before attempt `attempt` (1-based); the first attempt never waits
    pub fn delay_before(&self, attempt: u32) -> u32 {
        if attempt <= 1 || self.initial_delay_ms == 0 {
            return 0;
        }
        let exponent = (attempt - 2) as i32;
        let delay = self.initial_delay_ms as f64 * self.multiplier.powi(exponent);
        delay.min(self.max_delay_ms as f64) as u32
    }
}

/// Suspension between attempts (`setTimeout` in the browser)
pub trait Delay {
    async fn sleep(&self, ms: u32);
}

/// Never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Delay for NoDelay {
    async fn sleep(&self, _ms: u32) {}
}

/// All attempts failed
#[derive(Debug)]
pub struct Exhausted {
    pub attempts: u32,
    pub last_error: VersioningError,
}

/// Run `op` until it succeeds or the policy runs out of attempts
pub async fn retry<T, F, Fut, D>(
    policy: &RetryPolicy,
    delay: &D,
    label: &str,
    mut op: F,
) -> std::result::Result<T, Exhausted>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
    D: Delay,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        let wait = policy.delay_before(attempt);
        if wait > 0 {
            delay.sleep(wait).await;
        }
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= max_attempts => {
                return Err(Exhausted {
                    attempts: attempt,
                    last_error: err,
                });
            }
            Err(err) => {
                log_error!(
                    "[Retry] {} failed (attempt {}/{}), retrying... {}",
                    label,
                    attempt,
                    max_attempts,
                    err
                );
            }
        }
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct RecordingDelay {
        waits: RefCell<Vec<u32>>,
    }

    impl Delay for RecordingDelay {
        async fn sleep(&self, ms: u32) {
            self.waits.borrow_mut().push(ms);
        }
    }

    fn failure() -> VersioningError {
        VersioningError::Transport {
            url: "http://backend".into(),
            message: "connection refused".into(),
        }
    }

    #[test]
    fn test_backoff_schedule() {
        let policy = RetryPolicy::default();
        let delays: Vec<u32> = (1..=6).map(|a| policy.delay_before(a)).collect();
        assert_eq!(delays, vec![0, 100, 200, 400, 800, 1600]);

        let capped = RetryPolicy {
            max_delay_ms: 300,
            ..RetryPolicy::default()
        };
        assert_eq!(capped.delay_before(5), 300);
        assert_eq!(RetryPolicy::immediate(5).delay_before(3), 0);
    }

    #[test]
    fn test_first_success_stops() {
        let calls = Cell::new(0);
        let result = pollster::block_on(retry(&RetryPolicy::immediate(5), &NoDelay, "op", |_| {
            calls.set(calls.get() + 1);
            async { Ok::<_, VersioningError>(7) }
        }));
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_succeeds_on_third_attempt() {
        let delay = RecordingDelay::default();
        let result = pollster::block_on(retry(&RetryPolicy::default(), &delay, "op", |attempt| async move {
            if attempt < 3 {
                Err(failure())
            } else {
                Ok(attempt)
            }
        }));
        assert_eq!(result.unwrap(), 3);
        assert_eq!(*delay.waits.borrow(), vec![100, 200]);
    }

    #[test]
    fn test_exhausted_after_max_attempts() {
        let calls = Cell::new(0);
        let result: std::result::Result<(), _> =
            pollster::block_on(retry(&RetryPolicy::immediate(5), &NoDelay, "op", |_| {
                calls.set(calls.get() + 1);
                async { Err(failure()) }
            }));
        let exhausted = result.unwrap_err();
        assert_eq!(exhausted.attempts, 5);
        assert_eq!(calls.get(), 5);
        assert!(matches!(exhausted.last_error, VersioningError::Transport { .. }));
    }

    #[test]
    fn test_validate() {
        assert!(RetryPolicy::default().validate().is_ok());
        let bad = RetryPolicy {
            multiplier: 0.5,
            ..RetryPolicy::default()
        };
        assert!(bad.validate().is_err());
    }
}
