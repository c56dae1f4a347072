use crate::app_state::AppState;
use crate::domain::BiometricCapability;
use crate::handlers::shared_types::ApiResponse;
use axum::extract::State;

/// GET /biometric/availability
///
/// Reports the device sensor capability. Never fails: probing errors are
/// reported as `is_available: false`.
#[tracing::instrument(skip(state))]
pub async fn check_availability(
    State(state): State<AppState>,
) -> ApiResponse<BiometricCapability> {
    // ---
    ApiResponse::ok(state.coordinator().check_availability().await)
}
