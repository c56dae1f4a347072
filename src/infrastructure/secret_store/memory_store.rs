use crate::domain::SecretStore;
use anyhow::{bail, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Process-local secret store.
///
/// Can be switched into a failing mode to stand in for a locked or broken keystore.
#[derive(Default)]
pub struct MemorySecretStore {
    // ---
    values: RwLock<HashMap<String, String>>,
    failing: AtomicBool,
}

impl MemorySecretStore {
    // ---
    pub fn new() -> Self {
        // ---
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        // ---
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn contains(&self, key: &str) -> bool {
        // ---
        self.values.read().await.contains_key(key)
    }

    fn check(&self) -> Result<()> {
        // ---
        if self.failing.load(Ordering::SeqCst) {
            bail!("secure storage unavailable");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl SecretStore for MemorySecretStore {
    // ---
    async fn get(&self, key: &str) -> Result<Option<String>> {
        // ---
        self.check()?;
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        // ---
        self.check()?;
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        // ---
        self.check()?;
        self.values.write().await.remove(key);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        // ---
        self.check()
    }
}
