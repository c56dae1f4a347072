use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Sensor families a device can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiometricKind {
    // ---
    Fingerprint,
    Facial,
    Iris,
}

impl FromStr for BiometricKind {
    // ---
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // ---
        match s.trim().to_ascii_lowercase().as_str() {
            "fingerprint" | "touch" => Ok(BiometricKind::Fingerprint),
            "facial" | "face" => Ok(BiometricKind::Facial),
            "iris" => Ok(BiometricKind::Iris),
            other => Err(anyhow::anyhow!("unknown biometric kind: {other}")),
        }
    }
}

/// Biometric type recorded on a registration row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BiometricType {
    // ---
    Fingerprint,
    FacialRecognition,
    Iris,
    Unknown,
}

impl BiometricType {
    // ---
    pub fn as_str(&self) -> &'static str {
        // ---
        match self {
            BiometricType::Fingerprint => "FINGERPRINT",
            BiometricType::FacialRecognition => "FACIAL_RECOGNITION",
            BiometricType::Iris => "IRIS",
            BiometricType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for BiometricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored text that is not a known type reads back as `Unknown`.
impl FromStr for BiometricType {
    // ---
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // ---
        Ok(match s {
            "FINGERPRINT" => BiometricType::Fingerprint,
            "FACIAL_RECOGNITION" => BiometricType::FacialRecognition,
            "IRIS" => BiometricType::Iris,
            _ => BiometricType::Unknown,
        })
    }
}

/// Snapshot of what the device sensor can do right now. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BiometricCapability {
    // ---
    pub has_hardware: bool,
    pub is_enrolled: bool,
    pub supported_types: BTreeSet<BiometricKind>,
    pub is_available: bool,
}

impl BiometricCapability {
    // ---
    pub fn new(
        has_hardware: bool,
        is_enrolled: bool,
        supported_types: BTreeSet<BiometricKind>,
    ) -> Self {
        // ---
        Self {
            has_hardware,
            is_enrolled,
            supported_types,
            is_available: has_hardware && is_enrolled,
        }
    }

    /// The degraded answer used whenever probing the sensor fails.
    pub fn unavailable() -> Self {
        // ---
        Self::new(false, false, BTreeSet::new())
    }
}

/// A biometric registration row in the shared store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    // ---
    pub id: Uuid,
    pub user_id: String,
    pub device_id: String,
    pub biometric_type: BiometricType,

    /// Advisory spoof-resistance rank, 1 (weakest) to 3.
    pub security_level: i32,

    pub is_active: bool,
    pub registered_at: DateTime<Utc>,
    pub last_authenticated_at: Option<DateTime<Utc>>,
}

impl Registration {
    // ---
    /// Materialize a fresh, active row from an insert request.
    pub fn from_new(new: NewRegistration) -> Self {
        // ---
        Self {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            device_id: new.device_id,
            biometric_type: new.biometric_type,
            security_level: new.security_level,
            is_active: true,
            registered_at: Utc::now(),
            last_authenticated_at: None,
        }
    }
}

/// Insert request for a registration row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRegistration {
    // ---
    pub user_id: String,
    pub device_id: String,
    pub biometric_type: BiometricType,
    pub security_level: i32,
}

/// Device-local record saying "this user registered on this device".
///
/// Serialized as camelCase JSON into the secret store. It only points at the
/// remote row and must be validated against it before being trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalMarker {
    // ---
    pub registered: bool,
    pub registration_id: Uuid,
    pub device_id: String,
    pub registered_at: DateTime<Utc>,
}

impl LocalMarker {
    // ---
    pub fn new(registration_id: Uuid, device_id: String) -> Self {
        // ---
        Self {
            registered: true,
            registration_id,
            device_id,
            registered_at: Utc::now(),
        }
    }
}

/// Result of a registration-status lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationStatus {
    // ---
    NotRegistered,
    Registered {
        registration: Registration,
        local: LocalMarker,
    },
}

impl RegistrationStatus {
    // ---
    pub fn is_registered(&self) -> bool {
        matches!(self, RegistrationStatus::Registered { .. })
    }
}

/// Best-effort description of the host device, used to seed the device id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceDescriptor {
    // ---
    pub model_name: Option<String>,
    pub os_name: Option<String>,
}

/// Text and options shown by the native biometric prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengePrompt {
    // ---
    pub message: String,
    pub fallback_label: String,
    pub cancel_label: String,
    pub allow_device_fallback: bool,
}

/// Proof of a successful biometric authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticationReceipt {
    // ---
    pub user_id: String,
    pub registration_id: Uuid,
    pub authenticated_at: DateTime<Utc>,
}
