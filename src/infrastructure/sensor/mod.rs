//! Configuration-driven biometric sensor.
//!
//! Platform sensor SDKs (Android BiometricPrompt, iOS LocalAuthentication)
//! live outside this crate. `StaticSensor` reports a fixed capability and
//! answers every challenge with a fixed verdict, which is what the agent
//! uses on development hosts and in tests.

use crate::config::SensorConfig;
use crate::domain::{BiometricKind, BiometricSensor, ChallengeOutcome, ChallengePrompt, SensorPtr};
use anyhow::Result;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Creates a static sensor from configuration.
pub fn create_static_sensor(config: &SensorConfig) -> SensorPtr {
    // ---
    Arc::new(StaticSensor::new(config.clone()))
}

pub struct StaticSensor {
    // ---
    config: SensorConfig,
}

impl StaticSensor {
    // ---
    pub fn new(config: SensorConfig) -> Self {
        // ---
        Self { config }
    }
}

#[async_trait::async_trait]
impl BiometricSensor for StaticSensor {
    // ---
    async fn has_hardware(&self) -> Result<bool> {
        Ok(self.config.has_hardware)
    }

    async fn is_enrolled(&self) -> Result<bool> {
        Ok(self.config.is_enrolled)
    }

    async fn supported_types(&self) -> Result<BTreeSet<BiometricKind>> {
        Ok(self.config.supported_types.clone())
    }

    async fn challenge(&self, prompt: &ChallengePrompt) -> Result<ChallengeOutcome> {
        // ---
        tracing::debug!(
            "Static sensor prompt '{}' -> {:?}",
            prompt.message,
            self.config.verdict
        );
        Ok(self.config.verdict)
    }
}
