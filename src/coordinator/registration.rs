use super::capability::{classify_biometric_type, security_level};
use super::BiometricCoordinator;
use crate::domain::{LocalMarker, NewRegistration, Registration, RegistrationStatus};
use crate::error::{BiometricError, Result};
use uuid::Uuid;

const MARKER_KEY_PREFIX: &str = "biometric_registered_";

/// Secret-store key of a user's local registration marker.
pub fn marker_key(user_id: &str) -> String {
    // ---
    format!("{MARKER_KEY_PREFIX}{user_id}")
}

impl BiometricCoordinator {
    // ---
    /// Register the device biometric for `user_id`.
    ///
    /// Inserts the remote row first and only then writes the local marker.
    /// If the marker cannot be written the fresh row is deactivated again, so
    /// a failed call never leaves an active row behind unless the process dies
    /// between the two writes.
    pub async fn register(&self, user_id: &str) -> Result<Registration> {
        // ---
        let capability = self.check_availability().await;
        if !capability.is_available {
            tracing::warn!("Biometric registration refused for '{}': unavailable", user_id);
            return Err(BiometricError::BiometricUnavailable);
        }

        self.run_challenge(&self.prompts.registration_prompt())
            .await?;

        let device_id = self.device_id().await;
        let new_registration = NewRegistration {
            user_id: user_id.to_string(),
            device_id,
            biometric_type: classify_biometric_type(&capability.supported_types),
            security_level: security_level(&capability.supported_types),
        };

        let registration = self
            .repository
            .insert(new_registration)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert registration for '{}': {:?}", user_id, e);
                BiometricError::RegistrationPersistenceFailed(e.to_string())
            })?;

        let marker = LocalMarker::new(registration.id, registration.device_id.clone());
        if let Err(e) = self.write_marker(user_id, &marker).await {
            // ---
            tracing::error!(
                "Failed to write local marker for '{}', deactivating registration {}",
                user_id,
                registration.id
            );
            if let Err(undo) = self.repository.deactivate(registration.id).await {
                tracing::warn!(
                    "Registration {} left active without a local marker: {:?}",
                    registration.id,
                    undo
                );
            }
            return Err(e);
        }

        tracing::info!(
            "Biometric registered for '{}' (registration: {}, type: {})",
            user_id,
            registration.id,
            registration.biometric_type
        );

        Ok(registration)
    }

    /// Look up whether `user_id` has a live registration on this device.
    ///
    /// The remote row is authoritative. A marker whose row is missing,
    /// inactive, or cannot be fetched is deleted and reported as not
    /// registered. Never fails.
    pub async fn registration_status(&self, user_id: &str) -> RegistrationStatus {
        // ---
        let raw = match self.secrets.get(&marker_key(user_id)).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return RegistrationStatus::NotRegistered,
            Err(e) => {
                tracing::error!("Error checking biometric registration: {:?}", e);
                return RegistrationStatus::NotRegistered;
            }
        };

        let local: LocalMarker = match serde_json::from_str(&raw) {
            Ok(local) => local,
            Err(e) => {
                tracing::warn!("Unreadable local marker for '{}': {}", user_id, e);
                self.discard_marker(user_id).await;
                return RegistrationStatus::NotRegistered;
            }
        };

        match self.repository.find_active(local.registration_id).await {
            Ok(Some(registration)) => RegistrationStatus::Registered {
                registration,
                local,
            },
            Ok(None) => {
                tracing::info!(
                    "Registration {} for '{}' is no longer active, clearing local marker",
                    local.registration_id,
                    user_id
                );
                self.discard_marker(user_id).await;
                RegistrationStatus::NotRegistered
            }
            Err(e) => {
                tracing::warn!(
                    "Could not validate registration {} for '{}', clearing local marker: {:?}",
                    local.registration_id,
                    user_id,
                    e
                );
                self.discard_marker(user_id).await;
                RegistrationStatus::NotRegistered
            }
        }
    }

    /// Revoke the user's registration on this device.
    ///
    /// Returns the revoked registration id, or `None` when there was nothing
    /// to revoke. If the remote update fails the local marker is kept so the
    /// call can be retried.
    pub async fn revoke(&self, user_id: &str) -> Result<Option<Uuid>> {
        // ---
        let RegistrationStatus::Registered { registration, .. } =
            self.registration_status(user_id).await
        else {
            tracing::info!("No biometric registration found for '{}'", user_id);
            return Ok(None);
        };

        self.repository
            .deactivate(registration.id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to deactivate registration {}: {:?}", registration.id, e);
                BiometricError::RevocationPersistenceFailed(e.to_string())
            })?;

        self.secrets
            .delete(&marker_key(user_id))
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete local marker for '{}': {:?}", user_id, e);
                BiometricError::LocalStorageFailed(e.to_string())
            })?;

        tracing::info!(
            "Biometric registration {} revoked for '{}'",
            registration.id,
            user_id
        );

        Ok(Some(registration.id))
    }

    /// Read and decode the user's marker. Undecodable markers read as absent.
    pub(super) async fn load_marker(&self, user_id: &str) -> Result<Option<LocalMarker>> {
        // ---
        let raw = self
            .secrets
            .get(&marker_key(user_id))
            .await
            .map_err(|e| BiometricError::LocalStorageFailed(e.to_string()))?;

        Ok(raw.and_then(|raw| {
            serde_json::from_str(&raw)
                .map_err(|e| tracing::warn!("Unreadable local marker for '{}': {}", user_id, e))
                .ok()
        }))
    }

    async fn write_marker(&self, user_id: &str, marker: &LocalMarker) -> Result<()> {
        // ---
        let json = serde_json::to_string(marker)
            .map_err(|e| BiometricError::LocalStorageFailed(e.to_string()))?;

        self.secrets
            .set(&marker_key(user_id), &json)
            .await
            .map_err(|e| BiometricError::LocalStorageFailed(e.to_string()))
    }

    async fn discard_marker(&self, user_id: &str) {
        // ---
        if let Err(e) = self.secrets.delete(&marker_key(user_id)).await {
            tracing::warn!("Failed to clear local marker for '{}': {:?}", user_id, e);
        }
    }
}
