//! Biometric authentication handler.

use crate::app_state::AppState;
use crate::handlers::shared_types::{require_user_id, ApiError, ApiResponse};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AuthenticateRequest {
    //
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct AuthenticateResponse {
    //
    pub message: String,
    pub registration_id: Uuid,
    pub authentication_time: DateTime<Utc>,
}

// ============================================================================
// Authentication Handler
// ============================================================================

/// POST /biometric/authenticate
///
/// # Flow
/// 1. Validate the body (400 `INVALID_REQUEST` envelope when malformed)
/// 2. Load the device-local marker (404 `NOT_REGISTERED` when absent)
/// 3. Run the native biometric challenge (401 on reject/cancel)
/// 4. Stamp the registration row, best effort
///
/// The response does not depend on the registration store being reachable.
#[tracing::instrument(skip_all, fields(user_id = tracing::field::Empty))]
pub async fn authenticate(
    State(state): State<AppState>,
    payload: Result<Json<AuthenticateRequest>, JsonRejection>,
) -> Result<ApiResponse<AuthenticateResponse>, ApiError> {
    //
    let Json(req) = payload?;
    let user_id = require_user_id(&req.user_id)?;
    tracing::Span::current().record("user_id", user_id);

    let result = state.coordinator().authenticate(user_id).await;
    state.metrics().record_authentication(result.is_ok());
    let receipt = result?;

    Ok(ApiResponse::ok(AuthenticateResponse {
        message: "Authentication successful".to_string(),
        registration_id: receipt.registration_id,
        authentication_time: receipt.authenticated_at,
    }))
}
