//! Bounded polling for providers that run lookups as asynchronous jobs.
//!
//! [`poll_until_ready`] calls a status check up to `max_attempts` times with
//! a fixed delay between calls. A job still pending after the last attempt
//! is a terminal [`ProviderError::PollExhausted`]; errors from the check
//! itself are returned immediately and never retried.

use std::future::Future;
use std::time::Duration;

use crate::error::ProviderError;

/// Result of a single status check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStatus<T> {
    Pending,
    Ready(T),
}

/// Fixed attempt count and fixed delay. No back-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            interval: Duration::from_secs(2),
        }
    }
}

/// Runs `check` until it reports [`PollStatus::Ready`] or the budget runs out.
///
/// At least one check is always made, even when `max_attempts` is zero.
/// There is no sleep before the first check or after the last one.
///
/// # Errors
///
/// - [`ProviderError::PollExhausted`] if every attempt reported pending.
/// - Any error returned by `check`, unchanged.
pub(crate) async fn poll_until_ready<T, F, Fut>(
    policy: PollPolicy,
    mut check: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<PollStatus<T>, ProviderError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match check().await? {
            PollStatus::Ready(value) => return Ok(value),
            PollStatus::Pending if attempt >= max_attempts => {
                return Err(ProviderError::PollExhausted { attempts: attempt });
            }
            PollStatus::Pending => {
                tracing::debug!(
                    attempt,
                    max_attempts,
                    delay_ms = u64::try_from(policy.interval.as_millis()).unwrap_or(u64::MAX),
                    "provider job still pending"
                );
                tokio::time::sleep(policy.interval).await;
            }
        }
    }
}
