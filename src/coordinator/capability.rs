use super::BiometricCoordinator;
use crate::domain::{BiometricCapability, BiometricKind, BiometricType, ChallengePrompt};
use crate::error::{BiometricError, Result};
use std::collections::BTreeSet;

impl BiometricCoordinator {
    // ---
    /// Probe the device sensor.
    ///
    /// Never fails: any probing error degrades to an all-false capability.
    pub async fn check_availability(&self) -> BiometricCapability {
        // ---
        match self.probe_sensor().await {
            Ok(capability) => capability,
            Err(e) => {
                tracing::error!("Error checking biometric availability: {:?}", e);
                BiometricCapability::unavailable()
            }
        }
    }

    async fn probe_sensor(&self) -> anyhow::Result<BiometricCapability> {
        // ---
        let has_hardware = self.sensor.has_hardware().await?;
        let is_enrolled = self.sensor.is_enrolled().await?;
        let supported_types = self.sensor.supported_types().await?;

        tracing::debug!(
            "Sensor probe: hardware={} enrolled={} types={:?}",
            has_hardware,
            is_enrolled,
            supported_types
        );

        Ok(BiometricCapability::new(
            has_hardware,
            is_enrolled,
            supported_types,
        ))
    }

    /// Run the native prompt; anything but a successful scan is `AuthenticationFailed`.
    pub(super) async fn run_challenge(&self, prompt: &ChallengePrompt) -> Result<()> {
        // ---
        match self.sensor.challenge(prompt).await {
            Ok(outcome) if outcome.is_success() => Ok(()),
            Ok(outcome) => {
                tracing::info!("Biometric challenge not passed: {:?}", outcome);
                Err(BiometricError::AuthenticationFailed)
            }
            Err(e) => {
                tracing::error!("Biometric challenge errored: {:?}", e);
                Err(BiometricError::AuthenticationFailed)
            }
        }
    }
}

/// Pick the type recorded on a new registration row.
///
/// Facial recognition wins over fingerprint, which wins over iris.
pub fn classify_biometric_type(supported: &BTreeSet<BiometricKind>) -> BiometricType {
    // ---
    if supported.contains(&BiometricKind::Facial) {
        BiometricType::FacialRecognition
    } else if supported.contains(&BiometricKind::Fingerprint) {
        BiometricType::Fingerprint
    } else if supported.contains(&BiometricKind::Iris) {
        BiometricType::Iris
    } else {
        BiometricType::Unknown
    }
}

/// Advisory spoof-resistance rank of the strongest supported sensor.
pub fn security_level(supported: &BTreeSet<BiometricKind>) -> i32 {
    // ---
    if supported.contains(&BiometricKind::Iris) {
        3
    } else if supported.contains(&BiometricKind::Facial)
        || supported.contains(&BiometricKind::Fingerprint)
    {
        2
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn kinds(list: &[BiometricKind]) -> BTreeSet<BiometricKind> {
        list.iter().copied().collect()
    }

    #[test]
    fn fingerprint_only() {
        // ---
        let supported = kinds(&[BiometricKind::Fingerprint]);
        assert_eq!(classify_biometric_type(&supported), BiometricType::Fingerprint);
        assert_eq!(security_level(&supported), 2);
    }

    #[test]
    fn facial_takes_precedence_for_type_but_iris_for_level() {
        // ---
        let supported = kinds(&[
            BiometricKind::Fingerprint,
            BiometricKind::Facial,
            BiometricKind::Iris,
        ]);
        assert_eq!(
            classify_biometric_type(&supported),
            BiometricType::FacialRecognition
        );
        assert_eq!(security_level(&supported), 3);
    }

    #[test]
    fn iris_only() {
        // ---
        let supported = kinds(&[BiometricKind::Iris]);
        assert_eq!(classify_biometric_type(&supported), BiometricType::Iris);
        assert_eq!(security_level(&supported), 3);
    }

    #[test]
    fn nothing_supported() {
        // ---
        let supported = BTreeSet::new();
        assert_eq!(classify_biometric_type(&supported), BiometricType::Unknown);
        assert_eq!(security_level(&supported), 1);
    }
}
