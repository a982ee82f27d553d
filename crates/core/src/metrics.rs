//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Upstream stats API requests (counts, latency)
//! - Sink writes per backend
//! - Failed units of work per batch operation

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

// =============================================================================
// Stats API
// =============================================================================

/// Upstream API requests by endpoint and result.
pub static API_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("nhlscrape_api_requests_total", "Total stats API requests"),
        &["endpoint", "result"], // result: "success", "error"
    )
    .unwrap()
});

/// Upstream API request duration in seconds.
pub static API_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "nhlscrape_api_request_duration_seconds",
            "Duration of stats API requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["endpoint"],
    )
    .unwrap()
});

// =============================================================================
// Sink
// =============================================================================

/// Documents written by backend.
pub static FILES_WRITTEN: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("nhlscrape_files_written_total", "Total documents written"),
        &["backend"],
    )
    .unwrap()
});

// =============================================================================
// Batches
// =============================================================================

/// Units of work that failed, by operation.
pub static UNIT_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "nhlscrape_unit_failures_total",
            "Total units of work that failed",
        ),
        &["operation"], // "roster", "schedule", "player", "game", "draft"
    )
    .unwrap()
});

/// All core metrics for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(API_REQUESTS.clone()),
        Box::new(API_REQUEST_DURATION.clone()),
        Box::new(FILES_WRITTEN.clone()),
        Box::new(UNIT_FAILURES.clone()),
    ]
}

/// Registry holding every core metric.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    for metric in all_metrics() {
        registry.register(metric).unwrap();
    }
    registry
});

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
