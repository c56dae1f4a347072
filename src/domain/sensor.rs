use super::biometric_models::{BiometricKind, ChallengePrompt};
use anyhow::Result;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Verdict of a native biometric challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeOutcome {
    // ---
    Success,
    /// The user dismissed the prompt.
    Cancelled,
    /// The sensor rejected the presented biometric.
    Rejected,
}

impl ChallengeOutcome {
    // ---
    pub fn is_success(self) -> bool {
        self == ChallengeOutcome::Success
    }
}

/// Device biometric capability provider and challenge prompt.
#[async_trait::async_trait]
pub trait BiometricSensor: Send + Sync {
    // ---
    /// Whether biometric hardware is present.
    async fn has_hardware(&self) -> Result<bool>;

    /// Whether at least one biometric is enrolled on the device.
    async fn is_enrolled(&self) -> Result<bool>;

    /// Sensor types the device supports.
    async fn supported_types(&self) -> Result<BTreeSet<BiometricKind>>;

    /// Run the platform-native biometric prompt.
    async fn challenge(&self, prompt: &ChallengePrompt) -> Result<ChallengeOutcome>;
}

/// Type alias for any backend that implements BiometricSensor.
pub type SensorPtr = Arc<dyn BiometricSensor>;
