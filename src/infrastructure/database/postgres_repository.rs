use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{BiometricType, NewRegistration, Registration, RegistrationRepository};

#[derive(sqlx::FromRow)]
struct RegistrationRow {
    id: Uuid,
    user_id: String,
    device_id: String,
    biometric_type: String,
    security_level: i32,
    is_active: bool,
    registered_at: DateTime<Utc>,
    last_authenticated_at: Option<DateTime<Utc>>,
}

impl From<RegistrationRow> for Registration {
    fn from(r: RegistrationRow) -> Self {
        // ---
        Registration {
            id: r.id,
            user_id: r.user_id,
            device_id: r.device_id,
            biometric_type: r
                .biometric_type
                .parse()
                .unwrap_or(BiometricType::Unknown),
            security_level: r.security_level,
            is_active: r.is_active,
            registered_at: r.registered_at,
            last_authenticated_at: r.last_authenticated_at,
        }
    }
}

const SELECT_COLUMNS: &str = "SELECT id, user_id, device_id, biometric_type, security_level,
        is_active, registered_at, last_authenticated_at
     FROM biometric_registrations";

pub struct PostgresRepository {
    // ---
    pool: PgPool,
}

impl PostgresRepository {
    // ---
    pub fn new(pool: PgPool) -> Self {
        // ---
        Self { pool }
    }
}

#[async_trait::async_trait]
impl RegistrationRepository for PostgresRepository {
    // ---
    async fn insert(&self, registration: NewRegistration) -> Result<Registration> {
        // ---
        let registration = Registration::from_new(registration);

        sqlx::query(
            "INSERT INTO biometric_registrations
                (id, user_id, device_id, biometric_type, security_level, is_active, registered_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(registration.id)
        .bind(&registration.user_id)
        .bind(&registration.device_id)
        .bind(registration.biometric_type.as_str())
        .bind(registration.security_level)
        .bind(registration.is_active)
        .bind(registration.registered_at)
        .execute(&self.pool)
        .await?;

        Ok(registration)
    }

    async fn find_active(&self, id: Uuid) -> Result<Option<Registration>> {
        // ---
        let row = sqlx::query_as::<_, RegistrationRow>(&format!(
            "{SELECT_COLUMNS} WHERE id = $1 AND is_active = TRUE"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Registration::from))
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Registration>> {
        // ---
        let rows = sqlx::query_as::<_, RegistrationRow>(&format!(
            "{SELECT_COLUMNS} WHERE user_id = $1 ORDER BY registered_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Registration::from).collect())
    }

    async fn touch_last_authenticated(&self, id: Uuid, at: DateTime<Utc>) -> Result<u64> {
        // ---
        let result = sqlx::query(
            "UPDATE biometric_registrations SET last_authenticated_at = $1
             WHERE id = $2 AND is_active = TRUE",
        )
        .bind(at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn deactivate(&self, id: Uuid) -> Result<()> {
        // ---
        sqlx::query("UPDATE biometric_registrations SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
