//! Retries for calls to translation services.
//!
//! A failed attempt is retried only when the caller's predicate says the
//! error is transient. The pause before each retry doubles, up to a cap.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts per call, counting the first; never below 1
    pub max_attempts: u32,
    /// Pause after the first failure
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            max_delay: initial_delay,
            backoff_multiplier: 1.0,
        }
    }

    /// One word lookup: 1s, 2s, 4s, ... between attempts, capped at 5s.
    pub fn translation(max_attempts: u32) -> Self {
        Self {
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            ..Self::new(max_attempts, Duration::from_secs(1))
        }
    }

    /// Pause after failed attempt `attempt` (1-based).
    fn pause_after(&self, attempt: u32) -> Duration {
        let factor = self.backoff_multiplier.powi(attempt.saturating_sub(1) as i32);
        let secs = self.initial_delay.as_secs_f64() * factor;
        Duration::from_secs_f64(secs.min(self.max_delay.as_secs_f64()))
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::translation(3)
    }
}

/// Run `operation` until it succeeds, fails with an error `should_retry`
/// rejects, or runs out of attempts. The last error is returned.
pub async fn with_retry_if<T, E, F, Fut, P>(
    config: &RetryConfig,
    label: &str,
    mut operation: F,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let attempts = config.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!("{}: succeeded on attempt {}/{}", label, attempt, attempts);
                }
                return Ok(value);
            }
            Err(e) if !should_retry(&e) => {
                debug!("{}: not retrying: {}", label, e);
                return Err(e);
            }
            Err(e) if attempt >= attempts => {
                if attempts > 1 {
                    warn!("{}: giving up after {} attempts: {}", label, attempts, e);
                }
                return Err(e);
            }
            Err(e) => {
                let pause = config.pause_after(attempt);
                warn!(
                    "{}: attempt {}/{} failed ({}), retrying in {:?}",
                    label, attempt, attempts, e, pause
                );
                sleep(pause).await;
                attempt += 1;
            }
        }
    }
}
