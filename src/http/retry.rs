//! Retry policy and HTTP error classification.

use reqwest::StatusCode;
use std::time::Duration;

/// Default number of attempts for a download.
pub const MAX_RETRIES: usize = 3;

/// Default delay between attempts in milliseconds.
pub const RETRY_DELAY_MS: u64 = 1000;

/// How often and how patiently a request is repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Never below 1.
    pub attempts: usize,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: usize, delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
        }
    }

    /// Single attempt, no retry.
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(MAX_RETRIES, Duration::from_millis(RETRY_DELAY_MS))
    }
}

/// HTTP failures a retry cannot fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NonRetryableError {
    /// HTTP 429, or 403 mentioning a rate limit
    RateLimitExceeded(String),
    /// HTTP 401
    AuthenticationFailed(String),
    /// HTTP 404, usually a version without a published binary
    NotFound(String),
    /// HTTP 403 without rate limit
    Forbidden(String),
    /// Any other 4xx
    ClientError(String),
}

impl std::fmt::Display for NonRetryableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NonRetryableError::RateLimitExceeded(msg) => write!(
                f,
                "Rate limit exceeded: {}. Try again later or set GITHUB_TOKEN.",
                msg
            ),
            NonRetryableError::AuthenticationFailed(msg) => {
                write!(f, "Authentication failed: {}. Check your GITHUB_TOKEN.", msg)
            }
            NonRetryableError::NotFound(msg) => write!(f, "Not found: {}", msg),
            NonRetryableError::Forbidden(msg) => write!(f, "Access forbidden: {}", msg),
            NonRetryableError::ClientError(msg) => write!(f, "Request error: {}", msg),
        }
    }
}

impl std::error::Error for NonRetryableError {}

/// Classifies a failed response status.
/// Returns Ok(()) when the request may succeed on a later attempt.
pub fn classify_status(status: StatusCode, body_hint: &str) -> Result<(), NonRetryableError> {
    match status {
        StatusCode::UNAUTHORIZED => Err(NonRetryableError::AuthenticationFailed(
            "invalid or missing token".to_string(),
        )),
        StatusCode::FORBIDDEN if body_hint.to_lowercase().contains("rate limit") => Err(
            NonRetryableError::RateLimitExceeded("GitHub rate limit exceeded".to_string()),
        ),
        StatusCode::FORBIDDEN => Err(NonRetryableError::Forbidden(
            "access to this release asset is forbidden".to_string(),
        )),
        StatusCode::TOO_MANY_REQUESTS => Err(NonRetryableError::RateLimitExceeded(
            "too many requests".to_string(),
        )),
        StatusCode::NOT_FOUND => Err(NonRetryableError::NotFound(
            "no such release asset".to_string(),
        )),
        s if s.is_client_error() => Err(NonRetryableError::ClientError(format!(
            "HTTP {}",
            s.as_u16()
        ))),
        // 5xx and anything unexpected is worth another try
        _ => Ok(()),
    }
}

/// Converts an error from `error_for_status()` into an anyhow error that is
/// a [`NonRetryableError`] when retrying is pointless.
pub fn check_retryable(error: reqwest::Error) -> anyhow::Error {
    match error.status() {
        Some(status) => match classify_status(status, &error.to_string()) {
            Ok(()) => anyhow::Error::from(error),
            Err(non_retryable) => anyhow::Error::from(non_retryable),
        },
        // Connection errors, timeouts
        None => anyhow::Error::from(error),
    }
}

/// Whether an error produced by a request attempt may be retried.
pub fn is_retryable(error: &anyhow::Error) -> bool {
    error.downcast_ref::<NonRetryableError>().is_none()
}
