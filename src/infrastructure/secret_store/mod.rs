//! Device-local secret stores.

mod memory_store;
mod redis_store;

pub use memory_store::MemorySecretStore;
pub use redis_store::RedisSecretStore;

use crate::config::RedisConfig;
use crate::domain::SecretStorePtr;
use anyhow::Result;
use std::sync::Arc;

/// Creates a Redis-backed secret store from configuration.
///
/// # Errors
/// Returns an error if the Redis URL cannot be parsed. No connection is
/// attempted until the first operation.
pub fn create_redis_secret_store(config: &RedisConfig) -> Result<SecretStorePtr> {
    // ---
    let client = redis::Client::open(config.url.clone())?;
    Ok(Arc::new(RedisSecretStore::new(client, config.namespace.clone())))
}

/// Creates an empty process-local secret store.
pub fn create_memory_secret_store() -> Arc<MemorySecretStore> {
    // ---
    Arc::new(MemorySecretStore::new())
}
