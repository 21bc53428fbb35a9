//! Retry logic with exponential backoff for provider calls.
//!
//! Only transient provider failures (transport errors, rate limiting and
//! server errors) are retried; everything else fails immediately.

use serde::Deserialize;
use std::time::Duration;

use crate::provider::ProviderError;

/// Maximum delay between attempts (60 seconds)
const MAX_RETRY_DELAY_MS: u64 = 60_000;

fn default_max_retries() -> usize {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

/// How many times, and how patiently, a provider call is retried
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts allowed, including the first
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

impl RetryPolicy {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(1..=10).contains(&self.max_retries) {
            anyhow::bail!(
                "generation.max_retries must be between 1 and 10, got {}",
                self.max_retries
            );
        }
        if !(100..=60_000).contains(&self.retry_delay_ms) {
            anyhow::bail!(
                "generation.retry_delay_ms must be between 100 and 60000, got {}",
                self.retry_delay_ms
            );
        }
        if self.backoff_multiplier < 1.0 {
            anyhow::bail!(
                "generation.backoff_multiplier must be >= 1.0, got {}",
                self.backoff_multiplier
            );
        }
        Ok(())
    }
}

/// Decision after a failed attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry after the specified delay
    Retry(Duration),
    /// Give up with reason
    GiveUp(String),
}

/// Calculate exponential backoff delay for a given attempt number.
///
/// Formula: delay = base_delay * (backoff_multiplier ^ attempt), capped at
/// 60 seconds.
pub fn calculate_backoff_delay(attempt: usize, base_delay_ms: u64, backoff_multiplier: f64) -> u64 {
    let delay = (base_delay_ms as f64) * backoff_multiplier.powi(attempt as i32);

    if delay > MAX_RETRY_DELAY_MS as f64 {
        MAX_RETRY_DELAY_MS
    } else {
        delay as u64
    }
}

/// Decide whether to retry after `attempts` failed attempts ending in `error`.
pub fn decide_retry(attempts: usize, error: &ProviderError, policy: &RetryPolicy) -> RetryDecision {
    if !error.is_transient() {
        return RetryDecision::GiveUp(format!("Non-retryable error: {}", error));
    }

    if attempts >= policy.max_retries {
        return RetryDecision::GiveUp(format!(
            "Exceeded max retries ({}/{})",
            attempts, policy.max_retries
        ));
    }

    let delay_ms = calculate_backoff_delay(
        attempts.saturating_sub(1),
        policy.retry_delay_ms,
        policy.backoff_multiplier,
    );
    RetryDecision::Retry(Duration::from_millis(delay_ms))
}
