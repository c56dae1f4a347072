//! Uniform response envelope for biometric endpoints.
//!
//! Success: `{ "success": true, ...payload }`.
//! Failure: `{ "success": false, "kind": "...", "error": "..." }`.

use crate::error::BiometricError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Wrapper type for successful API responses.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(flatten)]
    pub data: T,
}

impl<T> ApiResponse<T> {
    // ---
    pub fn ok(data: T) -> Self {
        // ---
        Self {
            success: true,
            data,
        }
    }
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Body of a failed operation.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    // ---
    pub success: bool,
    pub kind: String,
    pub error: String,
}

/// Failed operation with the HTTP status it maps to.
#[derive(Debug)]
pub struct ApiError {
    // ---
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    // ---
    pub fn new(status: StatusCode, kind: &str, error: impl Into<String>) -> Self {
        // ---
        Self {
            status,
            body: ErrorResponse {
                success: false,
                kind: kind.to_string(),
                error: error.into(),
            },
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        // ---
        Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", error)
    }
}

impl From<BiometricError> for ApiError {
    fn from(err: BiometricError) -> Self {
        // ---
        let status = match err {
            BiometricError::BiometricUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            BiometricError::AuthenticationFailed => StatusCode::UNAUTHORIZED,
            BiometricError::NotRegistered => StatusCode::NOT_FOUND,
            BiometricError::RegistrationPersistenceFailed(_)
            | BiometricError::RevocationPersistenceFailed(_)
            | BiometricError::LocalStorageFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.kind(), err.to_string())
    }
}

/// Malformed or missing JSON bodies still answer with the envelope.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Reject blank user ids before they reach the coordinator.
///
/// Ids are opaque: anything that is not blank passes through unchanged.
pub fn require_user_id(user_id: &str) -> Result<&str, ApiError> {
    // ---
    if user_id.trim().is_empty() {
        return Err(ApiError::bad_request("user_id must not be empty"));
    }
    Ok(user_id)
}
