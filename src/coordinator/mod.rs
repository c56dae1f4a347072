//! Biometric registration / authentication coordinator.
//!
//! Mediates between three independent trust domains:
//!
//! - the device sensor (capability probe and native challenge),
//! - the device-local secret store (registration marker, device identity),
//! - the shared registration store (durable rows with an active flag).
//!
//! The coordinator holds no mutable state of its own. Every operation is a
//! sequence of awaited collaborator calls with no parallel branches; callers
//! are expected to keep at most one operation in flight per user.

mod authentication;
mod capability;
mod device_identity;
mod registration;


use crate::config::PromptConfig;
use crate::domain::{DeviceDescriptor, RepositoryPtr, SecretStorePtr, SensorPtr};

pub use capability::{classify_biometric_type, security_level};
pub use device_identity::DEVICE_ID_KEY;
pub use registration::marker_key;

/// Stateless service object owning handles to its collaborators.
///
/// Cheap to clone; all collaborators are behind `Arc`.
#[derive(Clone)]
pub struct BiometricCoordinator {
    // ---
    sensor: SensorPtr,
    secrets: SecretStorePtr,
    repository: RepositoryPtr,
    prompts: PromptConfig,
    device: DeviceDescriptor,
}

impl BiometricCoordinator {
    // ---
    pub fn new(
        sensor: SensorPtr,
        secrets: SecretStorePtr,
        repository: RepositoryPtr,
        prompts: PromptConfig,
        device: DeviceDescriptor,
    ) -> Self {
        // ---
        Self {
            sensor,
            secrets,
            repository,
            prompts,
            device,
        }
    }

    /// The registration store this coordinator writes to.
    pub fn repository(&self) -> &RepositoryPtr {
        // ---
        &self.repository
    }

    /// The device-local secret store this coordinator reads markers from.
    pub fn secrets(&self) -> &SecretStorePtr {
        // ---
        &self.secrets
    }
}
