//! Client configuration.
//!
//! The upstream service hardcodes its poll/retry numbers (5 attempts, 5
//! second fixed wait) in every call site; here they are plain data on the
//! config so tests and impatient callers can tune them.

use std::time::Duration;

/// Default connect timeout (seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// A bounded fixed-interval retry/poll policy. No jitter, no growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts before giving up.
    pub max_attempts: u32,
    /// Fixed wait between attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff: Duration::from_secs(5),
        }
    }
}

/// Configuration for [`Client`](crate::Client) construction.
///
/// `task_poll` governs the deferred-task resolver, `list_retry` the
/// paginated listing helper. They share a type but are tuned independently.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Value of the `User-Agent` header on every request.
    pub user_agent: String,
    /// TCP connect timeout for the shared connection pool.
    pub connect_timeout: Duration,
    /// Per-request timeout, covering the full round trip.
    pub request_timeout: Duration,
    /// Poll bound and interval for deferred-task resolution.
    pub task_poll: RetryPolicy,
    /// Retry bound and interval for 5xx failures during paginated listing.
    pub list_retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("ultradns-client-rs/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            task_poll: RetryPolicy::default(),
            list_retry: RetryPolicy::default(),
        }
    }
}
