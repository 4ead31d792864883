//! Metrics module for the transaction client.
//!
//! - This module contains the global Prometheus registry.
//! - Defines the invocation, endorsement, retry and commit metrics.

use std::time::Duration;

use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};

use crate::models::StatusError;

lazy_static! {
    // Global Prometheus registry.
    pub static ref REGISTRY: Registry = Registry::new();

    // Counter: channel client invocations by operation and outcome.
    pub static ref INVOCATIONS_TOTAL: CounterVec = {
        let opts = Opts::new("invocations_total", "Total number of channel client invocations");
        let counter_vec = CounterVec::new(opts, &["operation", "outcome"]).unwrap();
        REGISTRY.register(Box::new(counter_vec.clone())).unwrap();
        counter_vec
    };

    // Counter: per-peer endorsement failures by status group.
    pub static ref ENDORSEMENT_FAILURES_TOTAL: CounterVec = {
        let opts = Opts::new("endorsement_failures_total", "Total number of failed endorsements");
        let counter_vec = CounterVec::new(opts, &["group"]).unwrap();
        REGISTRY.register(Box::new(counter_vec.clone())).unwrap();
        counter_vec
    };

    // Counter: retry attempts by operation.
    pub static ref RETRIES_TOTAL: CounterVec = {
        let opts = Opts::new("retries_total", "Total number of retried invocations");
        let counter_vec = CounterVec::new(opts, &["operation"]).unwrap();
        REGISTRY.register(Box::new(counter_vec.clone())).unwrap();
        counter_vec
    };

    // Counter: commit watch outcomes.
    pub static ref COMMIT_EVENTS_TOTAL: CounterVec = {
        let opts = Opts::new("commit_events_total", "Total number of commit status outcomes");
        let counter_vec = CounterVec::new(opts, &["outcome"]).unwrap();
        REGISTRY.register(Box::new(counter_vec.clone())).unwrap();
        counter_vec
    };

    // Histogram for invocation latency in seconds.
    pub static ref INVOCATION_LATENCY: HistogramVec = {
      let histogram_opts = HistogramOpts::new("invocation_latency_seconds", "Invocation latency in seconds")
          .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 25.0, 50.0, 100.0]);
      let histogram_vec = HistogramVec::new(histogram_opts, &["operation"]).unwrap();
      REGISTRY.register(Box::new(histogram_vec.clone())).unwrap();
      histogram_vec
    };
}

/// Gather all metrics and encode into the provided format.
pub fn gather_metrics() -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(buffer)
}

/// Label for the outcome of an invocation: `success` or the failing group.
pub fn outcome_label<T>(result: &Result<T, StatusError>) -> String {
    match result {
        Ok(_) => "success".to_string(),
        Err(err) => err.group.to_string(),
    }
}

/// Records one finished invocation.
pub fn record_invocation<T>(operation: &str, result: &Result<T, StatusError>, elapsed: Duration) {
    let outcome = outcome_label(result);
    INVOCATIONS_TOTAL
        .with_label_values(&[operation, outcome.as_str()])
        .inc();
    INVOCATION_LATENCY
        .with_label_values(&[operation])
        .observe(elapsed.as_secs_f64());
}
