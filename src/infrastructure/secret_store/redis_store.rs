use crate::domain::SecretStore;
use anyhow::{Context, Result};
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};

/// Secret store backed by Redis string keys under a namespace prefix.
///
/// A multiplexed connection is opened per operation, mirroring how the
/// rest of the agent treats Redis as an on-demand resource.
pub struct RedisSecretStore {
    // ---
    client: Client,
    namespace: String,
}

impl RedisSecretStore {
    // ---
    pub fn new(client: Client, namespace: String) -> Self {
        // ---
        Self { client, namespace }
    }

    fn key(&self, key: &str) -> String {
        // ---
        format!("{}{}", self.namespace, key)
    }

    async fn conn(&self) -> Result<MultiplexedConnection> {
        // ---
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|err| {
                tracing::error!("Failed to connect to Redis: {:?}", err);
                err
            })
            .context("secret store unreachable")
    }
}

#[async_trait::async_trait]
impl SecretStore for RedisSecretStore {
    // ---
    async fn get(&self, key: &str) -> Result<Option<String>> {
        // ---
        let mut conn = self.conn().await?;
        let value: Option<String> = conn.get(self.key(key)).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        // ---
        let mut conn = self.conn().await?;
        let _: () = conn.set(self.key(key), value).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        // ---
        let mut conn = self.conn().await?;
        let _: u64 = conn.del(self.key(key)).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        // ---
        let mut conn = self.conn().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn keys_are_namespaced() {
        // ---
        let client = Client::open("redis://127.0.0.1:6379").unwrap();
        let store = RedisSecretStore::new(client, "bioreg:secret:".to_string());

        assert_eq!(
            store.key("biometric_registered_user_123"),
            "bioreg:secret:biometric_registered_user_123"
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_an_error() {
        // ---
        let client = Client::open("redis://invalid-host:6379").unwrap();
        let store = RedisSecretStore::new(client, String::new());

        assert!(store.get("device_id").await.is_err());
        assert!(store.ping().await.is_err());
    }
}
