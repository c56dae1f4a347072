//! Failure taxonomy for the biometric coordinator.
//!
//! Every coordinator operation returns `Result<T, BiometricError>`; the HTTP
//! layer turns the error side into a `{ "success": false, ... }` envelope so
//! raw collaborator failures never reach the UI.

/// Errors surfaced by coordinator operations.
#[derive(Debug, thiserror::Error)]
pub enum BiometricError {
    // ---
    #[error("Biometric authentication is not available")]
    BiometricUnavailable,

    #[error("Biometric authentication failed")]
    AuthenticationFailed,

    #[error("Biometric authentication not registered for this user")]
    NotRegistered,

    #[error("Failed to register biometric: {0}")]
    RegistrationPersistenceFailed(String),

    #[error("Failed to remove biometric registration: {0}")]
    RevocationPersistenceFailed(String),

    #[error("Secure storage failure: {0}")]
    LocalStorageFailed(String),
}

impl BiometricError {
    // ---
    /// Stable identifier for the error kind, used in response envelopes.
    pub fn kind(&self) -> &'static str {
        // ---
        match self {
            BiometricError::BiometricUnavailable => "BIOMETRIC_UNAVAILABLE",
            BiometricError::AuthenticationFailed => "AUTHENTICATION_FAILED",
            BiometricError::NotRegistered => "NOT_REGISTERED",
            BiometricError::RegistrationPersistenceFailed(_) => "REGISTRATION_PERSISTENCE_FAILED",
            BiometricError::RevocationPersistenceFailed(_) => "REVOCATION_PERSISTENCE_FAILED",
            BiometricError::LocalStorageFailed(_) => "LOCAL_STORAGE_FAILED",
        }
    }
}

pub type Result<T, E = BiometricError> = std::result::Result<T, E>;
