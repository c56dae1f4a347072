use crate::domain::Metrics;
use std::time::Instant;

/// Discards every event; `/metrics` renders an empty body.
pub struct NoopMetrics;

impl Metrics for NoopMetrics {
    // ---
    fn render(&self) -> String {
        String::new()
    }

    fn record_registration_created(&self) {}

    fn record_authentication(&self, _success: bool) {}

    fn record_revocation(&self) {}

    fn record_http_request(&self, _start: Instant, _path: &str, _method: &str, _status: u16) {}
}
