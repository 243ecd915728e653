//! Retry policies for proxy requests.

use std::time::Duration;

/// Retry policy for a proxy request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Single attempt.
    None,
    /// Every failure is retried, validation failures included.
    Uniform,
    /// Only errors whose class can heal are retried. Default.
    #[default]
    Classified,
    /// User-provided retry logic.
    Custom(RetryConfig),
}

impl RetryPolicy {
    /// The concrete config, or `None` for a single attempt.
    pub fn config(&self) -> Option<RetryConfig> {
        match self {
            RetryPolicy::None => None,
            RetryPolicy::Uniform => Some(RetryConfig::uniform()),
            RetryPolicy::Classified => Some(RetryConfig::classified()),
            RetryPolicy::Custom(c) => Some(c.clone()),
        }
    }
}

/// Which failures a [`RetryConfig`] retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOn {
    AnyError,
    /// Errors for which [`crate::error::HttpError::is_retryable`] holds.
    Retryable,
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not counting the initial request).
    pub max_retries: u32,
    /// Initial delay before the first retry.
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
        Self::classified()
    }
}

impl RetryConfig {
    /// Three attempts, one second apart, whatever the failure.
    pub fn uniform() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(1000),
            backoff_factor: 1.0,
            jitter: false,
            retry_on: RetryOn::AnyError,
        }
    }

    /// Same cadence as [`Self::uniform`], restricted to retryable errors.
    pub fn classified() -> Self {
        Self {
            retry_on: RetryOn::Retryable,
            ..Self::uniform()
        }
    }

    /// Calculate delay for a given attempt (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
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
}
