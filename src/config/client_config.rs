use std::{env, str::FromStr, time::Duration};

use crate::constants::{
    DEFAULT_BACKOFF_FACTOR, DEFAULT_COMMIT_TIMEOUT_MS, DEFAULT_INITIAL_BACKOFF_MS,
    DEFAULT_MAX_BACKOFF_MS,
};
use crate::services::{channel_client_retryable_codes, RetryOptions};

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// How long to wait for a commit event when the invocation sets no timeout.
    pub commit_timeout: Duration,
    /// Retry policy applied when the invocation sets none.
    pub retry: RetryOptions,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            commit_timeout: Duration::from_millis(DEFAULT_COMMIT_TIMEOUT_MS),
            retry: RetryOptions::no_retry().with_retryable_codes(channel_client_retryable_codes()),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            commit_timeout: Duration::from_millis(env_or(
                "COMMIT_TIMEOUT_MS",
                DEFAULT_COMMIT_TIMEOUT_MS,
            )),
            retry: RetryOptions::no_retry()
                .with_attempts(env_or("RETRY_ATTEMPTS", 0))
                .with_backoff(
                    Duration::from_millis(env_or(
                        "RETRY_INITIAL_BACKOFF_MS",
                        DEFAULT_INITIAL_BACKOFF_MS,
                    )),
                    Duration::from_millis(env_or("RETRY_MAX_BACKOFF_MS", DEFAULT_MAX_BACKOFF_MS)),
                    env_or("RETRY_BACKOFF_FACTOR", DEFAULT_BACKOFF_FACTOR),
                )
                .with_retryable_codes(channel_client_retryable_codes()),
        }
    }

    pub fn with_commit_timeout(mut self, commit_timeout: Duration) -> Self {
        self.commit_timeout = commit_timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryOptions) -> Self {
        self.retry = retry;
        self
    }
}
