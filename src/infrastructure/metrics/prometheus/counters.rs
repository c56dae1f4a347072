use metrics::{counter, histogram};
use std::time::Instant;

/// Increment the created-registrations counter.
pub fn increment_registration_created() {
    counter!("biometric_registrations_total").increment(1);
}

/// Count an authentication attempt, labelled by outcome.
pub fn increment_authentication(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!("biometric_authentications_total", "outcome" => outcome).increment(1);
}

/// Increment the revoked-registrations counter.
pub fn increment_revocation() {
    counter!("biometric_revocations_total").increment(1);
}

/// Track HTTP request latency using a histogram.
pub fn track_http_request(start: Instant, path: &str, method: &str, status: u16) {
    let elapsed = start.elapsed();
    histogram!(
        "http_request_duration_seconds",
        "path" => path.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .record(elapsed);
}
