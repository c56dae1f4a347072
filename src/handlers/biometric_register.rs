//! Biometric registration handler.

use crate::app_state::AppState;
use crate::domain::Registration;
use crate::handlers::shared_types::{require_user_id, ApiError, ApiResponse};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    // ---
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    // ---
    pub registration: Registration,
    pub message: String,
}

// ============================================================================
// Registration Handler
// ============================================================================

/// POST /biometric/register
///
/// Runs the native challenge, records a registration row, and writes the
/// device-local marker.
///
/// # Request Body
/// ```json
/// { "user_id": "user_123" }
/// ```
#[tracing::instrument(skip_all, fields(user_id = tracing::field::Empty))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiResponse<RegisterResponse>, ApiError> {
    // ---
    let Json(req) = payload?;
    let user_id = require_user_id(&req.user_id)?;
    tracing::Span::current().record("user_id", user_id);

    let registration = state.coordinator().register(user_id).await?;
    state.metrics().record_registration_created();

    Ok(ApiResponse::ok(RegisterResponse {
        registration,
        message: "Biometric authentication registered successfully".to_string(),
    }))
}
