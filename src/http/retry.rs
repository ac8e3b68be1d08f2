//! Retry policies for upstream requests.

use crate::error::HttpError;
use std::future::Future;
use std::time::Duration;

/// Retry policy for a logical fetch.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Single attempt.
    None,
    /// One immediate retry on any failure. Default for price history.
    #[default]
    Idempotent,
    /// User-provided retry logic.
    Custom(RetryConfig),
}

impl RetryPolicy {
    /// The concrete config for this policy.
    pub fn config(&self) -> RetryConfig {
        match self {
            RetryPolicy::None => RetryConfig {
                max_retries: 0,
                ..RetryConfig::price_history()
            },
            RetryPolicy::Idempotent => RetryConfig::price_history(),
            RetryPolicy::Custom(c) => c.clone(),
        }
    }
}

/// Which failures are worth another attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOn {
    /// Every error: transport, status, malformed body.
    AnyError,
    /// Transport failures, timeouts, and the listed HTTP statuses.
    Statuses(Vec<u16>),
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not counting the initial request).
    pub max_retries: u32,
    /// Initial delay before the first retry. Zero retries immediately.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: f64,
    /// Whether to add jitter to the delay.
    pub jitter: bool,
    pub retry_on: RetryOn,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::price_history()
    }
}

impl RetryConfig {
    /// At most two attempts in total, back to back, whatever went wrong.
    pub fn price_history() -> Self {
        Self {
            max_retries: 1,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_factor: 1.0,
            jitter: false,
            retry_on: RetryOn::AnyError,
        }
    }

    /// Exponential backoff on transport failures and 429/502/503/504.
    pub fn backoff() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
            jitter: true,
            retry_on: RetryOn::Statuses(vec![429, 502, 503, 504]),
        }
    }

    /// Calculate delay for a given attempt (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if self.initial_delay.is_zero() {
            return Duration::ZERO;
        }
        let base = self.initial_delay.as_millis() as f64
            * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let jitter_range = capped * 0.25;
            let jitter = (rand::random::<f64>() - 0.5) * 2.0 * jitter_range;
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }

    pub fn should_retry(&self, error: &HttpError) -> bool {
        let statuses = match &self.retry_on {
            RetryOn::AnyError => return true,
            RetryOn::Statuses(s) => s,
        };
        match error {
            HttpError::ServerError { status, .. } => statuses.contains(status),
            HttpError::RateLimited { .. } => statuses.contains(&429),
            HttpError::Timeout => true,
            HttpError::Reqwest(re) => {
                #[cfg(not(target_arch = "wasm32"))]
                let retryable = re.is_connect() || re.is_timeout() || re.is_request();
                #[cfg(target_arch = "wasm32")]
                let retryable = re.is_timeout() || re.is_request();
                retryable
            }
            _ => false,
        }
    }
}

/// Run `op` until it succeeds or the retry budget is spent.
///
/// Makes at most `max_retries + 1` calls. When retries were attempted and all
/// failed, the error is wrapped in [`HttpError::MaxRetriesExceeded`].
pub async fn with_retry<T, F, Fut>(config: &RetryConfig, label: &str, mut op: F) -> Result<T, HttpError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, HttpError>>,
{
    let mut attempt: u32 = 0;
    loop {
        let err = match op().await {
            Ok(v) => return Ok(v),
            Err(e) => e,
        };

        if !config.should_retry(&err) {
            return Err(err);
        }
        if attempt >= config.max_retries {
            if attempt == 0 {
                return Err(err);
            }
            return Err(HttpError::MaxRetriesExceeded {
                attempts: attempt + 1,
                last_error: err.to_string(),
            });
        }

        let mut delay = config.delay_for_attempt(attempt);
        if let HttpError::RateLimited {
            retry_after_ms: Some(ms),
        } = &err
        {
            delay = delay.max(Duration::from_millis(*ms));
        }
        tracing::debug!(
            attempt = attempt + 1,
            max = config.max_retries,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "Retrying request to {}",
            label
        );
        if !delay.is_zero() {
            futures_timer::Delay::new(delay).await;
        }
        attempt += 1;
    }
}
