//! Prometheus metrics implementation.
//!
//! This module provides a concrete implementation of the `Metrics` trait using
//! the Prometheus metrics format. It delegates to utility functions in sibling
//! modules (`counters.rs`, `recorder.rs`) which handle the actual metrics
//! collection via the global `metrics` crate registry.

use crate::domain::Metrics;
use std::time::Instant;

/// Prometheus-based metrics implementation.
///
/// Empty because metrics are registered globally via `counter!()` and
/// `histogram!()`; the global PrometheusHandle in `recorder.rs` renders them.
pub struct PrometheusMetrics {
    // Empty - uses global metrics registry pattern
}

impl PrometheusMetrics {
    pub fn new() -> Self {
        tracing::info!("Creating Prometheus metrics");
        PrometheusMetrics {}
    }
}

impl Metrics for PrometheusMetrics {
    fn render(&self) -> String {
        super::render_metrics()
    }

    fn record_registration_created(&self) {
        tracing::debug!("Recording registration created event");
        super::increment_registration_created();
    }

    fn record_authentication(&self, success: bool) {
        tracing::debug!("Recording authentication attempt (success={})", success);
        super::increment_authentication(success);
    }

    fn record_revocation(&self) {
        tracing::debug!("Recording revocation event");
        super::increment_revocation();
    }

    fn record_http_request(&self, start: Instant, path: &str, method: &str, status: u16) {
        super::track_http_request(start, path, method, status);
    }
}
