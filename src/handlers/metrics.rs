use crate::app_state::AppState;
use axum::{extract::State, http::header, response::IntoResponse};

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// GET /metrics
///
/// Scrape endpoint for the registration, authentication, and revocation
/// counters plus per-route latency. With the no-op backend the body is empty.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    // ---
    (
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        state.metrics().render(),
    )
}
