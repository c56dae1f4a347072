use anyhow::Result;
use std::sync::Arc;

/// Device-local secret storage (keychain / keystore style).
///
/// Values are opaque strings; the host is assumed to encrypt them at rest.
#[async_trait::async_trait]
pub trait SecretStore: Send + Sync {
    // ---
    /// Read a value, `None` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write (or overwrite) a value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Cheap liveness probe used by the full health check.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Type alias for any backend that implements SecretStore.
pub type SecretStorePtr = Arc<dyn SecretStore>;
