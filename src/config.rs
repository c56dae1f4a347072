// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! This module defines all startup-time configuration for the device agent.
//! Configuration is validated eagerly and failures are treated as
//! deployment errors rather than recoverable runtime conditions.

use anyhow::Result;
use std::time::Duration;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads a required environment variable.
///
/// # Behavior
/// - Fails fast if the variable is missing
/// - Produces a clear, human-readable error message
/// - Intended for startup-time configuration validation
macro_rules! required_env {
    // ---
    ($key:literal) => {
        std::env::var($key)
            .map_err(|_| anyhow::anyhow!(concat!("Missing required configuration: ", $key)))?
    };
}

/// Reads an optional environment variable and attempts to parse it.
///
/// If the variable is missing or cannot be parsed, the provided
/// default value is used.
macro_rules! optional_env_parse {
    // ---
    ($key:literal, $ty:ty, $default:expr) => {
        std::env::var($key)
            .ok()
            .and_then(|v| v.parse::<$ty>().ok())
            .unwrap_or($default)
    };
}

/// Reads an optional string environment variable with a default.
macro_rules! optional_env {
    // ---
    ($key:literal, $default:expr) => {
        std::env::var($key).unwrap_or_else(|_| $default.to_string())
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor fails due to a missing
/// required environment variable.
macro_rules! assert_missing_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Missing required configuration: ", $key)),
            "unexpected error: {err}"
        );
    }};
}

// ============================================================
// Public configuration facade
// ============================================================

/// Where registration rows live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteStoreKind {
    // ---
    Postgres,
    Memory,
}

/// Where device-local secrets (markers, device id) live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretStoreKind {
    // ---
    Redis,
    Memory,
}

/// Aggregated application configuration.
///
/// This is the single source of truth for startup configuration.
/// Backend-specific sections are only present (and only required) when
/// the corresponding backend is selected.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub remote_store: RemoteStoreKind,
    pub secret_store: SecretStoreKind,
    pub database: Option<database::DatabaseConfig>,
    pub redis: Option<redis::RedisConfig>,
    pub prompts: prompt::PromptConfig,
    pub device: crate::domain::DeviceDescriptor,
    pub sensor: sensor::SensorConfig,
    pub metrics_type: String,
}

impl AppConfig {
    /// Loads and validates all application configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if any required configuration is missing or invalid.
    pub fn from_env() -> Result<Self> {
        // ---
        let remote_store = match optional_env!("BIOREG_REMOTE_STORE", "postgres").as_str() {
            "postgres" => RemoteStoreKind::Postgres,
            "memory" => RemoteStoreKind::Memory,
            other => anyhow::bail!("Invalid BIOREG_REMOTE_STORE: {other}"),
        };
        let secret_store = match optional_env!("BIOREG_SECRET_STORE", "redis").as_str() {
            "redis" => SecretStoreKind::Redis,
            "memory" => SecretStoreKind::Memory,
            other => anyhow::bail!("Invalid BIOREG_SECRET_STORE: {other}"),
        };

        let database = match remote_store {
            RemoteStoreKind::Postgres => Some(database::DatabaseConfig::from_env()?),
            RemoteStoreKind::Memory => None,
        };
        let redis = match secret_store {
            SecretStoreKind::Redis => Some(redis::RedisConfig::from_env()?),
            SecretStoreKind::Memory => None,
        };

        Ok(Self {
            remote_store,
            secret_store,
            database,
            redis,
            prompts: prompt::PromptConfig::from_env(),
            device: device_from_env(),
            sensor: sensor::SensorConfig::from_env()?,
            metrics_type: optional_env!("BIOREG_METRICS_TYPE", "noop"),
        })
    }
}

/// Address the agent binds to.
pub fn bind_addr_from_env() -> String {
    // ---
    optional_env!("BIOREG_BIND_ADDR", "127.0.0.1:8080")
}

fn device_from_env() -> crate::domain::DeviceDescriptor {
    // ---
    crate::domain::DeviceDescriptor {
        model_name: std::env::var("BIOREG_DEVICE_MODEL").ok(),
        os_name: std::env::var("BIOREG_DEVICE_OS").ok(),
    }
}

// ============================================================
// Database configuration
// ============================================================

mod database {
    // ---
    use super::*;

    /// Registration-store configuration derived from environment variables.
    #[derive(Debug, Clone)]
    pub struct DatabaseConfig {
        /// PostgreSQL connection string.
        pub database_url: String,

        /// Number of retry attempts when initializing the database connection. Defaults to 50.
        pub retry_count: u32,

        /// Maximum time to wait when acquiring a connection from the pool. Defaults to 30 seconds.
        pub acquire_timeout: Duration,

        /// Minimum number of connections to keep in the pool, even when idle. Defaults to 2.
        pub min_connections: u32,

        /// Maximum number of connections to be open concurrently. Defaults to 15
        pub max_connections: u32,
    }

    impl DatabaseConfig {
        /// Builds a [`DatabaseConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if `DATABASE_URL` is missing.
        pub fn from_env() -> Result<Self> {
            // ---
            let database_url = required_env!("DATABASE_URL");
            let retry_count = optional_env_parse!("BIOREG_DB_RETRY_COUNT", u32, 50);
            let acquire_timeout_secs = optional_env_parse!("BIOREG_DB_ACQUIRE_TIMEOUT_SEC", u64, 30);
            let min_connections = optional_env_parse!("BIOREG_DB_MIN_CONNECTIONS", u32, 2);
            let max_connections = optional_env_parse!("BIOREG_DB_MAX_CONNECTIONS", u32, 15);

            Ok(Self {
                database_url,
                retry_count,
                acquire_timeout: Duration::from_secs(acquire_timeout_secs),
                min_connections,
                max_connections,
            })
        }
    }
}
pub use database::DatabaseConfig;

// ============================================================
// Redis configuration
// ============================================================

mod redis {
    // ---
    use super::*;

    /// Redis-backed secret store configuration.
    #[derive(Debug, Clone)]
    pub struct RedisConfig {
        /// Redis connection string.
        pub url: String,

        /// Prefix applied to every secret key, so several agents can share one server.
        pub namespace: String,
    }

    impl RedisConfig {
        /// Builds a [`RedisConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if `BIOREG_REDIS_URL` is missing.
        pub fn from_env() -> Result<Self> {
            // ---
            let url = required_env!("BIOREG_REDIS_URL");
            let namespace = optional_env!("BIOREG_SECRET_NAMESPACE", "bioreg:secret:");

            Ok(Self { url, namespace })
        }
    }
}
pub use redis::RedisConfig;

// ============================================================
// Native prompt configuration
// ============================================================

mod prompt {
    // ---
    use crate::domain::ChallengePrompt;

    /// Text and options for the native biometric prompt.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct PromptConfig {
        pub register_message: String,
        pub authenticate_message: String,
        pub fallback_label: String,
        pub cancel_label: String,

        /// Whether the prompt may fall back to the device passcode.
        pub allow_device_fallback: bool,
    }

    impl Default for PromptConfig {
        fn default() -> Self {
            // ---
            Self {
                register_message: "Register your biometric authentication".to_string(),
                authenticate_message: "Authenticate with your biometric".to_string(),
                fallback_label: "Use passcode".to_string(),
                cancel_label: "Cancel".to_string(),
                allow_device_fallback: true,
            }
        }
    }

    impl PromptConfig {
        /// Builds a [`PromptConfig`], falling back to the defaults per field.
        pub fn from_env() -> Self {
            // ---
            let defaults = Self::default();

            Self {
                register_message: optional_env!("BIOREG_PROMPT_REGISTER", defaults.register_message),
                authenticate_message: optional_env!(
                    "BIOREG_PROMPT_AUTHENTICATE",
                    defaults.authenticate_message
                ),
                fallback_label: optional_env!("BIOREG_PROMPT_FALLBACK_LABEL", defaults.fallback_label),
                cancel_label: optional_env!("BIOREG_PROMPT_CANCEL_LABEL", defaults.cancel_label),
                allow_device_fallback: optional_env_parse!(
                    "BIOREG_PROMPT_ALLOW_DEVICE_FALLBACK",
                    bool,
                    defaults.allow_device_fallback
                ),
            }
        }

        pub fn registration_prompt(&self) -> ChallengePrompt {
            // ---
            self.prompt(&self.register_message)
        }

        pub fn authentication_prompt(&self) -> ChallengePrompt {
            // ---
            self.prompt(&self.authenticate_message)
        }

        fn prompt(&self, message: &str) -> ChallengePrompt {
            // ---
            ChallengePrompt {
                message: message.to_string(),
                fallback_label: self.fallback_label.clone(),
                cancel_label: self.cancel_label.clone(),
                allow_device_fallback: self.allow_device_fallback,
            }
        }
    }
}
pub use prompt::PromptConfig;

// ============================================================
// Static sensor configuration
// ============================================================

mod sensor {
    // ---
    use super::*;
    use crate::domain::{BiometricKind, ChallengeOutcome};
    use std::collections::BTreeSet;

    /// Capability and verdict reported by the configured static sensor.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SensorConfig {
        pub has_hardware: bool,
        pub is_enrolled: bool,
        pub supported_types: BTreeSet<BiometricKind>,
        pub verdict: ChallengeOutcome,
    }

    impl Default for SensorConfig {
        fn default() -> Self {
            // ---
            Self {
                has_hardware: true,
                is_enrolled: true,
                supported_types: BTreeSet::from([BiometricKind::Fingerprint]),
                verdict: ChallengeOutcome::Success,
            }
        }
    }

    impl SensorConfig {
        /// Builds a [`SensorConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error for unknown sensor types or verdicts.
        pub fn from_env() -> Result<Self> {
            // ---
            let has_hardware = optional_env_parse!("BIOREG_SENSOR_HARDWARE", bool, true);
            let is_enrolled = optional_env_parse!("BIOREG_SENSOR_ENROLLED", bool, true);

            let supported_types = optional_env!("BIOREG_SENSOR_TYPES", "fingerprint")
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(str::parse::<BiometricKind>)
                .collect::<Result<BTreeSet<_>>>()?;

            let verdict = match optional_env!("BIOREG_SENSOR_VERDICT", "approve").as_str() {
                "approve" => ChallengeOutcome::Success,
                "reject" => ChallengeOutcome::Rejected,
                "cancel" => ChallengeOutcome::Cancelled,
                other => anyhow::bail!("Invalid BIOREG_SENSOR_VERDICT: {other}"),
            };

            Ok(Self {
                has_hardware,
                is_enrolled,
                supported_types,
                verdict,
            })
        }
    }
}
pub use sensor::SensorConfig;

// ============================================================
// Tests
// ============================================================
