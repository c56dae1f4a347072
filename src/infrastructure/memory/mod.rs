//! In-process registration store for development and tests.
//!
//! Behaves like the Postgres store (rows are never removed, lookups honour
//! the active flag) and can simulate an outage so callers' partial-failure
//! paths can be exercised.

use crate::domain::{NewRegistration, Registration, RegistrationRepository};
use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Creates an empty in-memory registration store.
pub fn create_memory_repository() -> Arc<MemoryRepository> {
    // ---
    Arc::new(MemoryRepository::new())
}

#[derive(Default)]
pub struct MemoryRepository {
    // ---
    rows: RwLock<Vec<Registration>>,
    offline: AtomicBool,
}

impl MemoryRepository {
    // ---
    pub fn new() -> Self {
        // ---
        Self::default()
    }

    /// While offline every call fails as an unreachable store would.
    pub fn set_offline(&self, offline: bool) {
        // ---
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Snapshot of every stored row, in insertion order.
    pub async fn rows(&self) -> Vec<Registration> {
        // ---
        self.rows.read().await.clone()
    }

    fn check_online(&self) -> Result<()> {
        // ---
        if self.offline.load(Ordering::SeqCst) {
            bail!("registration store unreachable");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl RegistrationRepository for MemoryRepository {
    // ---
    async fn insert(&self, registration: NewRegistration) -> Result<Registration> {
        // ---
        self.check_online()?;

        let registration = Registration::from_new(registration);
        self.rows.write().await.push(registration.clone());

        Ok(registration)
    }

    async fn find_active(&self, id: Uuid) -> Result<Option<Registration>> {
        // ---
        self.check_online()?;

        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|r| r.id == id && r.is_active)
            .cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Registration>> {
        // ---
        self.check_online()?;

        let mut rows: Vec<Registration> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.registered_at.cmp(&a.registered_at));

        Ok(rows)
    }

    async fn touch_last_authenticated(&self, id: Uuid, at: DateTime<Utc>) -> Result<u64> {
        // ---
        self.check_online()?;

        let mut rows = self.rows.write().await;
        let mut touched = 0;
        for row in rows.iter_mut().filter(|r| r.id == id && r.is_active) {
            row.last_authenticated_at = Some(at);
            touched += 1;
        }

        Ok(touched)
    }

    async fn deactivate(&self, id: Uuid) -> Result<()> {
        // ---
        self.check_online()?;

        for row in self.rows.write().await.iter_mut().filter(|r| r.id == id) {
            row.is_active = false;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::domain::BiometricType;

    fn new_registration(user_id: &str) -> NewRegistration {
        // ---
        NewRegistration {
            user_id: user_id.to_string(),
            device_id: "test_device".to_string(),
            biometric_type: BiometricType::Fingerprint,
            security_level: 2,
        }
    }

    #[tokio::test]
    async fn inserted_rows_are_active_until_deactivated() {
        // ---
        let repo = MemoryRepository::new();
        let row = repo.insert(new_registration("bilbo")).await.unwrap();

        assert!(row.is_active);
        assert_eq!(repo.find_active(row.id).await.unwrap(), Some(row.clone()));

        repo.deactivate(row.id).await.unwrap();
        assert_eq!(repo.find_active(row.id).await.unwrap(), None);

        // Rows are kept, just inactive
        let rows = repo.rows().await;
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].is_active);
    }

    #[tokio::test]
    async fn touch_only_hits_active_rows() {
        // ---
        let repo = MemoryRepository::new();
        let row = repo.insert(new_registration("frodo")).await.unwrap();
        let now = Utc::now();

        assert_eq!(repo.touch_last_authenticated(row.id, now).await.unwrap(), 1);
        assert_eq!(repo.rows().await[0].last_authenticated_at, Some(now));

        repo.deactivate(row.id).await.unwrap();
        assert_eq!(repo.touch_last_authenticated(row.id, now).await.unwrap(), 0);
        assert_eq!(
            repo.touch_last_authenticated(Uuid::new_v4(), now).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn list_filters_by_user() {
        // ---
        let repo = MemoryRepository::new();
        repo.insert(new_registration("sam")).await.unwrap();
        repo.insert(new_registration("sam")).await.unwrap();
        repo.insert(new_registration("merry")).await.unwrap();

        let rows = repo.list_by_user("sam").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.user_id == "sam"));
        assert!(rows[0].registered_at >= rows[1].registered_at);
    }

    #[tokio::test]
    async fn offline_store_fails_every_call() {
        // ---
        let repo = MemoryRepository::new();
        repo.set_offline(true);

        assert!(repo.insert(new_registration("pippin")).await.is_err());
        assert!(repo.find_active(Uuid::new_v4()).await.is_err());
        assert!(repo.deactivate(Uuid::new_v4()).await.is_err());

        repo.set_offline(false);
        assert!(repo.insert(new_registration("pippin")).await.is_ok());
    }
}
