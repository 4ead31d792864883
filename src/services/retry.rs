//! Bounded retry with capped exponential backoff.
//!
//! The policy is independent of what it retries: it only looks at the
//! `(Group, code)` of the [`StatusError`] an attempt produced.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::time::Duration;

use log::{debug, warn};
use tokio::time::sleep;

use crate::constants::{
    DEFAULT_BACKOFF_FACTOR, DEFAULT_INITIAL_BACKOFF_MS, DEFAULT_MAX_BACKOFF_MS,
    DEFAULT_RETRY_ATTEMPTS, MAX_BACKOFF_EXPONENT,
};
use crate::metrics::RETRIES_TOTAL;
use crate::models::{Group, PeerStatus, SdkCode, StatusError};

/// Status codes, per group, that are worth another attempt.
pub type RetryableCodes = HashMap<Group, HashSet<i32>>;

#[derive(Debug, Clone, PartialEq)]
pub struct RetryOptions {
    /// Retries after the first invocation; total invocations is `attempts + 1`.
    pub attempts: usize,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub backoff_factor: f64,
    pub retryable_codes: RetryableCodes,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_RETRY_ATTEMPTS,
            initial_backoff: Duration::from_millis(DEFAULT_INITIAL_BACKOFF_MS),
            max_backoff: Duration::from_millis(DEFAULT_MAX_BACKOFF_MS),
            backoff_factor: DEFAULT_BACKOFF_FACTOR,
            retryable_codes: default_retryable_codes(),
        }
    }
}

impl RetryOptions {
    /// Single invocation, no retry.
    pub fn no_retry() -> Self {
        Self {
            attempts: 0,
            ..Default::default()
        }
    }

    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }

    pub fn with_backoff(mut self, initial: Duration, max: Duration, factor: f64) -> Self {
        self.initial_backoff = initial;
        self.max_backoff = max;
        self.backoff_factor = factor;
        self
    }

    pub fn with_retryable_codes(mut self, codes: RetryableCodes) -> Self {
        self.retryable_codes = codes;
        self
    }

    /// Delay before retry number `attempt` (0-based):
    /// `initial_backoff * backoff_factor^attempt`, capped at `max_backoff`.
    pub fn backoff(&self, attempt: usize) -> Duration {
        let exponent = attempt.min(MAX_BACKOFF_EXPONENT) as i32;
        let backoff =
            self.initial_backoff.as_millis() as f64 * self.backoff_factor.powi(exponent);
        let capped = backoff.min(self.max_backoff.as_millis() as f64);
        Duration::from_millis(capped as u64)
    }

    pub fn is_retryable(&self, err: &StatusError) -> bool {
        self.retryable_codes
            .get(&err.group)
            .is_some_and(|codes| codes.contains(&err.code))
    }
}

fn codes<I: IntoIterator<Item = i32>>(codes: I) -> HashSet<i32> {
    codes.into_iter().collect()
}

/// Transport hiccups and overloaded services on either the endorser or the
/// orderer side.
pub fn default_retryable_codes() -> RetryableCodes {
    HashMap::from([
        (
            Group::EndorserClient,
            codes([SdkCode::ConnectionFailed.into()]),
        ),
        (
            Group::EndorserServer,
            codes([PeerStatus::ServiceUnavailable.into()]),
        ),
        (
            Group::OrdererClient,
            codes([SdkCode::ConnectionFailed.into()]),
        ),
        (
            Group::OrdererServer,
            codes([PeerStatus::ServiceUnavailable.into()]),
        ),
    ])
}

/// Default set plus client-side timeouts towards peers and orderers.
pub fn channel_client_retryable_codes() -> RetryableCodes {
    let mut retryable = default_retryable_codes();
    for group in [Group::EndorserClient, Group::OrdererClient] {
        retryable
            .entry(group)
            .or_default()
            .insert(SdkCode::Timeout.into());
    }
    retryable
}

/// Runs `operation` until it succeeds, fails with a non-retryable status, or
/// the attempts run out. Attempts never overlap.
pub async fn retry<T, F, Fut>(
    options: &RetryOptions,
    operation_name: &str,
    mut operation: F,
) -> Result<T, StatusError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, StatusError>>,
{
    let mut attempt = 0;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if err.is_permanent() || !options.is_retryable(&err) {
            debug!("{} failed with non-retryable error: {}", operation_name, err);
            return Err(err);
        }
        if attempt >= options.attempts {
            warn!(
                "{} failed after {} attempts: {}",
                operation_name,
                attempt + 1,
                err
            );
            return Err(err);
        }

        let delay = options.backoff(attempt);
        warn!(
            "{} attempt {} failed, retrying in {:?}: {}",
            operation_name,
            attempt + 1,
            delay,
            err
        );
        RETRIES_TOTAL.with_label_values(&[operation_name]).inc();
        sleep(delay).await;
        attempt += 1;
    }
}
