use crate::app_state::AppState;
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

/// Route-layer middleware recording request latency by matched route.
///
/// Uses the route template (`/biometric/status/{user_id}`) rather than the
/// raw path so user ids never become label values.
pub async fn track_http_request(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    // ---
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let response = next.run(request).await;

    state
        .metrics()
        .record_http_request(start, &path, &method, response.status().as_u16());

    response
}
