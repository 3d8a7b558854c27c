//! Execution parameters: per-call control for gateway dispatch.
//!
//! [`ExecutionParams`] groups the static parameters that bound a single
//! `send`. These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-call control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Upper bound on one backend invocation. `None` leaves it to the transport.
    pub request_timeout: Option<Duration>,
    /// Retry schedule for retryable failures. `None` sends exactly once.
    pub retry: Option<RetryPolicy>,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(120)),
            retry: None,
        }
    }
}

impl ExecutionParams {
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: Option<RetryPolicy>) -> Self {
        self.retry = retry;
        self
    }
}

/// Exponential backoff for transient gateway failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt
    pub limit: u32,
    /// Wait before the first retry; doubles for each retry after it
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            limit: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(limit: u32, base_delay: Duration) -> Self {
        Self { limit, base_delay }
    }

    /// Wait before retry number `retry` (1-based): 1x, 2x, 4x ... the base delay.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }
}
