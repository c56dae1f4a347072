use super::BiometricCoordinator;
use crate::domain::AuthenticationReceipt;
use crate::error::{BiometricError, Result};
use chrono::Utc;

impl BiometricCoordinator {
    // ---
    /// Authenticate `user_id` with the device biometric.
    ///
    /// Success depends only on the local marker and the sensor verdict. The
    /// `last_authenticated_at` stamp on the remote row is best effort, so a
    /// registered device keeps working while the shared store is unreachable.
    pub async fn authenticate(&self, user_id: &str) -> Result<AuthenticationReceipt> {
        // ---
        let local = self.load_marker(user_id).await?.ok_or_else(|| {
            tracing::warn!("Authentication attempt for unregistered user: {}", user_id);
            BiometricError::NotRegistered
        })?;

        self.run_challenge(&self.prompts.authentication_prompt())
            .await?;

        let authenticated_at = Utc::now();
        match self
            .repository
            .touch_last_authenticated(local.registration_id, authenticated_at)
            .await
        {
            Ok(0) => tracing::warn!(
                "No active registration {} to stamp for '{}'",
                local.registration_id,
                user_id
            ),
            Ok(_) => {}
            Err(e) => tracing::warn!("Failed to update authentication timestamp: {:?}", e),
        }

        tracing::info!("User '{}' authenticated with biometric", user_id);

        Ok(AuthenticationReceipt {
            user_id: user_id.to_string(),
            registration_id: local.registration_id,
            authenticated_at,
        })
    }
}
