use super::biometric_models::{NewRegistration, Registration};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Abstraction over the shared store holding biometric registration rows.
///
/// Rows are never hard-deleted: revocation flips `is_active` and successful
/// authentications stamp `last_authenticated_at`.
#[async_trait::async_trait]
pub trait RegistrationRepository: Send + Sync {
    // ---
    /// Insert a new active registration and return the stored row.
    async fn insert(&self, registration: NewRegistration) -> Result<Registration>;

    /// Fetch a registration by id, only if it is still active.
    async fn find_active(&self, id: Uuid) -> Result<Option<Registration>>;

    /// List every registration row for a user, newest first.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Registration>>;

    /// Stamp `last_authenticated_at` on an active registration.
    ///
    /// Returns the number of rows touched (0 when the row is missing or inactive).
    async fn touch_last_authenticated(&self, id: Uuid, at: DateTime<Utc>) -> Result<u64>;

    /// Mark a registration inactive.
    async fn deactivate(&self, id: Uuid) -> Result<()>;
}

/// Type alias for any backend that implements RegistrationRepository.
pub type RepositoryPtr = Arc<dyn RegistrationRepository>;
