use std::sync::Arc;
use std::time::Instant;

/// Counters and latency histograms emitted by the device agent.
///
/// Implementations must be cheap to call from request handlers.
pub trait Metrics: Send + Sync + 'static {
    // ---
    /// Text exposition served at `/metrics`.
    fn render(&self) -> String;

    /// A registration row was created and its local marker written.
    fn record_registration_created(&self);

    /// One authentication attempt, labelled by outcome.
    fn record_authentication(&self, success: bool);

    /// A live registration was revoked.
    fn record_revocation(&self);

    /// Latency of one HTTP request, keyed by matched route.
    fn record_http_request(&self, start: Instant, path: &str, method: &str, status: u16);
}

/// Shared handle to the configured metrics backend.
pub type MetricsPtr = Arc<dyn Metrics>;
