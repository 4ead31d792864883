//! Retry policy defaults for channel client invocations.

/// Number of retries applied by `RetryOptions::default()`.
pub const DEFAULT_RETRY_ATTEMPTS: usize = 3;

/// Delay before the first retry, in milliseconds.
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 500;

/// Upper bound for any single retry delay, in milliseconds.
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 60_000;

/// Growth factor applied to the delay after every attempt.
pub const DEFAULT_BACKOFF_FACTOR: f64 = 2.0;

// Exponent clamp so the factor never overflows to infinity.
pub const MAX_BACKOFF_EXPONENT: usize = 32;
