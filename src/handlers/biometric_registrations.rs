//! Registration status, listing, and revocation handlers.

use crate::app_state::AppState;
use crate::domain::{LocalMarker, Registration, RegistrationStatus};
use crate::handlers::shared_types::{require_user_id, ApiError, ApiResponse};
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
};
use serde::Serialize;
use uuid::Uuid;

// ============================================================================
// Response Types
// ============================================================================

/// Registration status as seen from this device.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    // ---
    pub is_registered: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration: Option<Registration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_data: Option<LocalMarker>,
}

impl From<RegistrationStatus> for StatusResponse {
    fn from(status: RegistrationStatus) -> Self {
        // ---
        match status {
            RegistrationStatus::NotRegistered => StatusResponse {
                is_registered: false,
                registration: None,
                local_data: None,
            },
            RegistrationStatus::Registered {
                registration,
                local,
            } => StatusResponse {
                is_registered: true,
                registration: Some(registration),
                local_data: Some(local),
            },
        }
    }
}

// ---

#[derive(Debug, Serialize)]
pub struct RevokeResponse {
    // ---
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_id: Option<Uuid>,
}

// ---

/// Every registration row recorded for a user, active or not.
#[derive(Debug, Serialize)]
pub struct ListRegistrationsResponse {
    // ---
    pub registrations: Vec<Registration>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /biometric/status/{user_id}
///
/// Validates the local marker against the registration store. Stale markers
/// are cleared as a side effect.
#[tracing::instrument(skip_all, fields(user_id = tracing::field::Empty))]
pub async fn registration_status(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<StatusResponse>, ApiError> {
    // ---
    let Path(user_id) = path?;
    let user_id = require_user_id(&user_id)?;
    tracing::Span::current().record("user_id", user_id);
    let status = state.coordinator().registration_status(user_id).await;

    Ok(ApiResponse::ok(status.into()))
}

/// DELETE /biometric/registration/{user_id}
///
/// Idempotent: revoking when nothing is registered succeeds.
#[tracing::instrument(skip_all, fields(user_id = tracing::field::Empty))]
pub async fn revoke_registration(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<RevokeResponse>, ApiError> {
    // ---
    let Path(user_id) = path?;
    let user_id = require_user_id(&user_id)?;
    tracing::Span::current().record("user_id", user_id);

    let response = match state.coordinator().revoke(user_id).await? {
        Some(registration_id) => {
            state.metrics().record_revocation();
            RevokeResponse {
                message: "Biometric registration removed successfully".to_string(),
                registration_id: Some(registration_id),
            }
        }
        None => RevokeResponse {
            message: "No biometric registration found".to_string(),
            registration_id: None,
        },
    };

    Ok(ApiResponse::ok(response))
}

/// GET /biometric/registrations/{user_id}
///
/// Lists rows straight from the registration store, including inactive ones.
#[tracing::instrument(skip_all, fields(user_id = tracing::field::Empty))]
pub async fn list_registrations(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<ListRegistrationsResponse>, ApiError> {
    // ---
    let Path(user_id) = path?;
    let user_id = require_user_id(&user_id)?;
    tracing::Span::current().record("user_id", user_id);

    let registrations = state
        .coordinator()
        .repository()
        .list_by_user(user_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list registrations for '{}': {:?}", user_id, e);
            ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "REGISTRY_UNAVAILABLE",
                "Failed to list biometric registrations",
            )
        })?;

    Ok(ApiResponse::ok(ListRegistrationsResponse { registrations }))
}
