//! Bounded retries with capped exponential backoff.

use std::{fmt::Display, future::Future, time::Duration};

use log::warn;

use crate::constants::{
    DEFAULT_RPC_MAX_RETRIES, DEFAULT_RPC_RETRY_BASE_DELAY_MS, DEFAULT_RPC_RETRY_MAX_DELAY_MS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u8,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_RPC_MAX_RETRIES,
            base_delay_ms: DEFAULT_RPC_RETRY_BASE_DELAY_MS,
            max_delay_ms: DEFAULT_RPC_RETRY_MAX_DELAY_MS,
        }
    }
}

impl RetryConfig {
    pub fn new(max_retries: u8, base_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_retries,
            base_delay_ms,
            max_delay_ms,
        }
    }

    /// Delay before retry number `attempt` (zero based): `base * 2^attempt`,
    /// capped at `max_delay_ms`.
    pub fn delay_for(&self, attempt: u8) -> Duration {
        let factor = 1u64 << u32::from(attempt.min(20));
        let delay = self.base_delay_ms.saturating_mul(factor).min(self.max_delay_ms);
        Duration::from_millis(delay)
    }
}

/// Runs `operation` until it succeeds, fails with an error `is_retriable`
/// rejects, or the retry budget is spent.
pub async fn retry_with_backoff<T, E, F, Fut, R>(
    operation_name: &str,
    config: &RetryConfig,
    is_retriable: R,
    mut operation: F,
) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
{
    let mut attempt: u8 = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt < config.max_retries && is_retriable(&error) => {
                let delay = config.delay_for(attempt);
                warn!(
                    "{} failed (attempt {}/{}): {}. Retrying in {:?}",
                    operation_name,
                    attempt + 1,
                    u16::from(config.max_retries) + 1,
                    error,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
