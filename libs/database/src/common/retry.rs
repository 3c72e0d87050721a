use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Retry configuration for database connections
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt (`None` = unbounded)
    pub max_retries: Option<u32>,

    /// Initial delay between retries in milliseconds
    pub initial_delay_ms: u64,

    /// Maximum delay between retries in milliseconds
    pub max_delay_ms: u64,

    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,

    /// Whether to add jitter to prevent thundering herd
    pub use_jitter: bool,

    /// Give up once this much time has passed since the first attempt
    pub max_elapsed: Option<Duration>,
}

impl RetryConfig {
    /// Create a new retry configuration with defaults
    ///
    /// Defaults:
    /// - max_retries: unbounded
    /// - initial_delay_ms: 500
    /// - max_delay_ms: 60000
    /// - backoff_multiplier: 1.5
    /// - use_jitter: true
    /// - max_elapsed: 15 minutes
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a retry config with custom max retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Create a retry config with custom initial delay
    pub fn with_initial_delay(mut self, delay_ms: u64) -> Self {
        self.initial_delay_ms = delay_ms;
        self
    }

    /// Create a retry config with custom max delay
    pub fn with_max_delay(mut self, delay_ms: u64) -> Self {
        self.max_delay_ms = delay_ms;
        self
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    pub fn with_max_elapsed(mut self, max_elapsed: Option<Duration>) -> Self {
        self.max_elapsed = max_elapsed;
        self
    }

    /// Disable jitter
    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    fn next_delay(&self, delay_ms: u64) -> u64 {
        ((delay_ms as f64 * self.backoff_multiplier) as u64).min(self.max_delay_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: None,
            initial_delay_ms: 500,
            max_delay_ms: 60_000,
            backoff_multiplier: 1.5,
            use_jitter: true,
            max_elapsed: Some(Duration::from_secs(15 * 60)),
        }
    }
}

/// Why [`retry_with_backoff`] stopped without a success
#[derive(Debug, thiserror::Error)]
pub enum RetryError<E> {
    /// The cancellation future resolved first
    #[error("cancelled after {attempts} attempt(s)")]
    Cancelled { attempts: u32, last_error: Option<E> },

    /// Max retries or max elapsed time reached
    #[error("gave up after {attempts} attempt(s): {last_error}")]
    Exhausted { attempts: u32, last_error: E },
}

impl<E> RetryError<E> {
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Cancelled { attempts, .. } | RetryError::Exhausted { attempts, .. } => {
                *attempts
            }
        }
    }
}

/// Retry an async operation with exponential backoff until it succeeds,
/// the policy gives up, or `cancelled` resolves.
///
/// `cancelled` is polled during every attempt and every backoff sleep, so a
/// shutdown signal interrupts either. On success the value is returned with
/// the number of attempts it took.
///
/// # Example
/// ```ignore
/// use database::common::retry::{retry_with_backoff, RetryConfig};
///
/// let (db, attempts) = retry_with_backoff(
///     || async { database::postgres::connect(&db_url).await },
///     &RetryConfig::new().with_max_retries(5),
///     shutdown.cancelled(),
/// )
/// .await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E, C>(
    mut operation: F,
    config: &RetryConfig,
    cancelled: C,
) -> Result<(T, u32), RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    C: Future<Output = ()>,
{
    tokio::pin!(cancelled);

    let started = Instant::now();
    let mut attempts: u32 = 0;
    let mut delay = config.initial_delay_ms;
    let mut last_error: Option<E> = None;

    loop {
        attempts += 1;

        let outcome = tokio::select! {
            biased;
            _ = &mut cancelled => {
                info!(attempts, "Retry loop cancelled during attempt");
                return Err(RetryError::Cancelled { attempts, last_error });
            }
            outcome = operation() => outcome,
        };

        let error = match outcome {
            Ok(value) => {
                if attempts > 1 {
                    debug!("Operation succeeded after {} attempts", attempts);
                }
                return Ok((value, attempts));
            }
            Err(e) => e,
        };

        let retries_exhausted = config.max_retries.is_some_and(|max| attempts > max);
        let elapsed_exhausted = config
            .max_elapsed
            .is_some_and(|max| started.elapsed() >= max);

        if retries_exhausted || elapsed_exhausted {
            warn!(
                attempts,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Operation failed, giving up: {}",
                error
            );
            return Err(RetryError::Exhausted {
                attempts,
                last_error: error,
            });
        }

        let current_delay = if config.use_jitter {
            apply_jitter(delay)
        } else {
            delay
        };

        warn!(
            attempt = attempts,
            retry_in_ms = current_delay,
            "Operation failed: {}",
            error
        );
        last_error = Some(error);

        tokio::select! {
            biased;
            _ = &mut cancelled => {
                info!(attempts, "Retry loop cancelled during backoff");
                return Err(RetryError::Cancelled { attempts, last_error });
            }
            _ = tokio::time::sleep(Duration::from_millis(current_delay)) => {}
        }

        delay = config.next_delay(delay);
    }
}

/// Apply jitter to a delay value to prevent thundering herd
///
/// Uses a random value between 50% and 100% of the original delay
fn apply_jitter(delay: u64) -> u64 {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let random_factor =
        (RandomState::new().hash_one(std::time::SystemTime::now()) % 50) as f64 / 100.0 + 0.5; // 0.5 to 1.0

    (delay as f64 * random_factor) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::sync::Notify;

    #[tokio::test]
    async fn test_retry_success_first_attempt() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = retry_with_backoff(
            || {
                let counter = counter_clone.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>("success")
                }
            },
            &RetryConfig::default(),
            future::pending(),
        )
        .await;

        let (value, attempts) = result.unwrap();
        assert_eq!(value, "success");
        assert_eq!(attempts, 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_success_after_failures() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let config = RetryConfig::new().with_initial_delay(10).without_jitter();

        let result = retry_with_backoff(
            || {
                let counter = counter_clone.clone();
                async move {
                    let count = counter.fetch_add(1, Ordering::SeqCst);
                    if count < 2 {
                        Err(format!("Attempt {}", count + 1))
                    } else {
                        Ok("success")
                    }
                }
            },
            &config,
            future::pending(),
        )
        .await;

        let (value, attempts) = result.unwrap();
        assert_eq!(value, "success");
        assert_eq!(attempts, 3);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_max_retries_exceeded() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let config = RetryConfig::new()
            .with_max_retries(2)
            .with_initial_delay(10)
            .without_jitter();

        let result = retry_with_backoff(
            || {
                let counter = counter_clone.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<String, _>("always fails")
                }
            },
            &config,
            future::pending(),
        )
        .await;

        match result {
            Err(RetryError::Exhausted {
                attempts,
                last_error,
            }) => {
                assert_eq!(attempts, 3); // 1 initial + 2 retries
                assert_eq!(last_error, "always fails");
            }
            other => panic!("expected Exhausted, got {:?}", other),
        }
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_max_elapsed_exceeded() {
        let config = RetryConfig::new()
            .with_initial_delay(20)
            .with_max_elapsed(Some(Duration::from_millis(50)))
            .without_jitter();

        let result = retry_with_backoff(
            || async { Err::<(), _>("down") },
            &config,
            future::pending(),
        )
        .await;

        let err = result.unwrap_err();
        assert!(matches!(err, RetryError::Exhausted { .. }));
        assert!(err.attempts() >= 2);
    }

    #[tokio::test]
    async fn test_retry_cancelled_after_attempts() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();
        let notify = Arc::new(Notify::new());
        let notify_clone = notify.clone();
        let start = Instant::now();

        let config = RetryConfig::new().with_initial_delay(20).without_jitter();

        let result = retry_with_backoff(
            || {
                let counter = counter_clone.clone();
                let notify = notify_clone.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) + 1 == 3 {
                        notify.notify_one();
                    }
                    Err::<(), _>("unreachable")
                }
            },
            &config,
            async move { notify.notified().await },
        )
        .await;

        match result {
            Err(RetryError::Cancelled {
                attempts,
                last_error,
            }) => {
                assert_eq!(attempts, 3);
                assert_eq!(last_error, Some("unreachable"));
            }
            other => panic!("expected Cancelled, got {:?}", other),
        }
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        // Two backoff sleeps happened before the third attempt
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_retry_cancelled_before_first_attempt_completes() {
        let result = retry_with_backoff(
            || future::pending::<Result<(), String>>(),
            &RetryConfig::default(),
            tokio::time::sleep(Duration::from_millis(10)),
        )
        .await;

        match result {
            Err(RetryError::Cancelled {
                attempts,
                last_error,
            }) => {
                assert_eq!(attempts, 1);
                assert!(last_error.is_none());
            }
            other => panic!("expected Cancelled, got {:?}", other),
        }
    }

    #[test]
    fn test_retry_config_defaults() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, None);
        assert_eq!(config.initial_delay_ms, 500);
        assert_eq!(config.max_delay_ms, 60_000);
        assert_eq!(config.backoff_multiplier, 1.5);
        assert!(config.use_jitter);
        assert_eq!(config.max_elapsed, Some(Duration::from_secs(900)));
    }

    #[test]
    fn test_retry_config_builder() {
        let config = RetryConfig::new()
            .with_max_retries(5)
            .with_initial_delay(200)
            .with_max_delay(10000)
            .with_multiplier(2.0)
            .without_jitter();

        assert_eq!(config.max_retries, Some(5));
        assert_eq!(config.initial_delay_ms, 200);
        assert_eq!(config.max_delay_ms, 10000);
        assert_eq!(config.backoff_multiplier, 2.0);
        assert!(!config.use_jitter);
    }

    #[test]
    fn test_next_delay_is_capped() {
        let config = RetryConfig::new().with_max_delay(1000);
        assert_eq!(config.next_delay(500), 750);
        assert_eq!(config.next_delay(800), 1000);
        assert_eq!(config.next_delay(1000), 1000);
    }

    #[test]
    fn test_apply_jitter() {
        let delay = 1000;
        for _ in 0..10 {
            let jittered = apply_jitter(delay);
            assert!(jittered >= 500); // At least 50%
            assert!(jittered <= 1000); // At most 100%
        }
    }
}
