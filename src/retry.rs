//! Retry logic with exponential backoff.
//!
//! Metadata requests are retried on every failure until the policy's elapsed
//! time bound is reached. There is no attempt cap: the clock is the only
//! give-up condition.

use std::future::Future;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::config::RetryConfig;
use crate::error::{Error, Result};

/// Stateful exponential backoff schedule.
#[derive(Debug)]
pub struct ExponentialBackoff {
    current_interval: Duration,
    max_interval: Duration,
    max_elapsed: Duration,
    multiplier: f64,
    randomization_factor: f64,
    started: Instant,
}

impl ExponentialBackoff {
    pub fn new(config: &RetryConfig) -> Self {
        Self {
            current_interval: config.initial_interval(),
            max_interval: config.max_interval(),
            max_elapsed: config.max_elapsed(),
            multiplier: config.multiplier,
            randomization_factor: config.randomization_factor,
            started: Instant::now(),
        }
    }

    /// Time since the schedule started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Next delay to wait, or `None` once the elapsed bound has been passed.
    pub fn next_backoff(&mut self) -> Option<Duration> {
        if self.elapsed() > self.max_elapsed {
            return None;
        }

        let delay = randomize(self.current_interval, self.randomization_factor);
        self.increment();
        Some(delay)
    }

    fn increment(&mut self) {
        let next = self.current_interval.as_secs_f64() * self.multiplier;
        if next >= self.max_interval.as_secs_f64() {
            self.current_interval = self.max_interval;
        } else {
            self.current_interval = Duration::from_secs_f64(next);
        }
    }
}

/// Pick a delay uniformly from `interval * [1 - factor, 1 + factor]`.
fn randomize(interval: Duration, factor: f64) -> Duration {
    if factor <= 0.0 {
        return interval;
    }
    let base = interval.as_secs_f64();
    let delta = base * factor;
    let secs = rand::thread_rng().gen_range((base - delta)..=(base + delta));
    Duration::from_secs_f64(secs.max(0.0))
}

/// Run `operation` until it succeeds or the backoff policy gives up.
///
/// Every error counts as transient. On give-up the last error is reported in
/// [`Error::RetriesExhausted`].
pub async fn retry_with_backoff<F, Fut, T>(config: &RetryConfig, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut backoff = ExponentialBackoff::new(config);
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    tracing::info!(attempts = attempt, "Request succeeded after retry");
                }
                return Ok(result);
            }
            Err(e) => match backoff.next_backoff() {
                Some(delay) => {
                    tracing::warn!(
                        error = %e,
                        attempt = attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                None => {
                    tracing::error!(
                        error = %e,
                        attempts = attempt,
                        elapsed_ms = backoff.elapsed().as_millis() as u64,
                        "All attempts failed"
                    );
                    return Err(Error::RetriesExhausted {
                        attempts: attempt,
                        last_error: e.to_string(),
                    });
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_config(max_elapsed_ms: u64) -> RetryConfig {
        RetryConfig {
            initial_interval_ms: 5,
            randomization_factor: 0.0,
            multiplier: 2.0,
            max_interval_ms: 20,
            max_elapsed_ms,
        }
    }

    fn unavailable() -> Error {
        Error::HttpStatus {
            url: "https://api.example.com/v2/blog/staff.tumblr.com/posts".into(),
            status: 503,
        }
    }

    #[test]
    fn test_intervals_grow_and_cap() {
        let mut backoff = ExponentialBackoff::new(&fast_config(60_000));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(5)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(10)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(20)));
        assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(20)));
    }

    #[test]
    fn test_randomized_delay_within_bounds() {
        let interval = Duration::from_millis(100);
        for _ in 0..50 {
            let delay = randomize(interval, 0.5);
            assert!(delay >= Duration::from_millis(50));
            assert!(delay <= Duration::from_millis(150));
        }
    }

    #[tokio::test]
    async fn test_retry_succeeds_after_failures() {
        let calls = AtomicU32::new(0);
        let result = retry_with_backoff(&fast_config(5_000), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(unavailable())
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_elapsed_bound() {
        let calls = AtomicU32::new(0);
        let started = Instant::now();
        let result: Result<()> = retry_with_backoff(&fast_config(50), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(unavailable()) }
        })
        .await;

        match result {
            Err(Error::RetriesExhausted { attempts, .. }) => {
                assert!(attempts > 1);
                assert_eq!(attempts, calls.load(Ordering::SeqCst));
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
