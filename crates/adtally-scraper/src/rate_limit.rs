//! Politeness throttling and retry utilities for the listing client.
//!
//! Every outbound request, retries included, waits a fixed politeness delay
//! first. A transient failure (non-success status, timeout, connection error)
//! additionally waits an exponential backoff before the next attempt.
//! Malformed response bodies are propagated immediately without retrying.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Upper bound on a single backoff sleep.
const MAX_BACKOFF_SECS: u64 = 60;

/// Request pacing shared by every call a client makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Delay before every request attempt.
    pub inter_request_delay: Duration,
    /// Retry attempts allowed after the first failure.
    pub max_retries: u32,
    /// Base for the backoff schedule: `backoff_base_secs * 2^attempt`.
    pub backoff_base_secs: u64,
}

impl RetryPolicy {
    /// A policy with no delays, for tests and local fixtures.
    #[must_use]
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            inter_request_delay: Duration::ZERO,
            max_retries,
            backoff_base_secs: 0,
        }
    }

    /// Backoff before retry number `attempt + 1`, capped at [`MAX_BACKOFF_SECS`].
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let secs = self
            .backoff_base_secs
            .saturating_mul(1u64 << attempt.min(62))
            .min(MAX_BACKOFF_SECS);
        Duration::from_secs(secs)
    }
}

/// Spreads a backoff by ±25 % so repeated failures don't retry in lockstep.
fn with_jitter(delay: Duration) -> Duration {
    delay.mul_f64(rand::random::<f64>() * 0.5 + 0.75)
}

/// Returns `true` if `err` represents a transient condition that should be
/// retried after a backoff delay.
///
/// Retriable:
/// - [`ScraperError::TransientStatus`]: any non-success HTTP status.
/// - [`ScraperError::Http`] when the failure is a timeout or connection error.
///
/// Everything else (body decode failures, bad URLs, bad patterns) is
/// returned immediately; retrying would produce the same result.
pub(crate) fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::TransientStatus { .. } => true,
        ScraperError::Http(e) => e.is_timeout() || e.is_connect(),
        ScraperError::Deserialize { .. }
        | ScraperError::InvalidUrl { .. }
        | ScraperError::InvalidPattern { .. } => false,
    }
}

/// Executes `operation` under `policy`.
///
/// Each attempt is preceded by `policy.inter_request_delay`. On a retriable
/// error the function also sleeps `policy.backoff_for(attempt)` and tries
/// again, up to `policy.max_retries` additional attempts. When retries are
/// exhausted the last error is returned. Backoffs carry ±25 % jitter.
///
/// | Attempt | Backoff before it, before jitter (`backoff_base_secs = 2`) |
/// |---------|--------------------------------------------|
/// | 0 (initial) | none |
/// | 1 | 2 s |
/// | 2 | 4 s |
/// | 3 | 8 s |
/// | 6+ | 60 s (cap) |
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;

    loop {
        if !policy.inter_request_delay.is_zero() {
            tokio::time::sleep(policy.inter_request_delay).await;
        }

        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !is_retriable(&err) || attempt >= policy.max_retries {
            return Err(err);
        }

        let delay = with_jitter(policy.backoff_for(attempt));
        tracing::warn!(
            attempt,
            max_retries = policy.max_retries,
            delay_ms = delay.as_millis(),
            error = %err,
            "transient fetch error; retrying after backoff"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
