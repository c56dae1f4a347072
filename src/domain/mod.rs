mod biometric_models;
mod metrics;
mod repository;
mod secret_store;
mod sensor;

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr};

// Publicly expose the biometric data model
pub use biometric_models::{
    AuthenticationReceipt, // ---
    BiometricCapability,
    BiometricKind,
    BiometricType,
    ChallengePrompt,
    DeviceDescriptor,
    LocalMarker,
    NewRegistration,
    Registration,
    RegistrationStatus,
};

// Publicly expose the collaborator abstractions
pub use repository::{RegistrationRepository, RepositoryPtr};
pub use secret_store::{SecretStore, SecretStorePtr};
pub use sensor::{BiometricSensor, ChallengeOutcome, SensorPtr};
