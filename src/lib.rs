// src/lib.rs
use anyhow::Result;
use app_state::AppState;
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use handlers::*;

// Public exports (visible outside this module)
pub mod domain;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod coordinator;
mod error;
mod handlers;
mod infrastructure;

// Hoist up only the public symbol(s)
pub use coordinator::{
    classify_biometric_type, // ---
    marker_key,
    security_level,
    BiometricCoordinator,
    DEVICE_ID_KEY,
};
pub use error::BiometricError;

pub use config::*;

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_lazy_pool, // ---
    create_memory_repository,
    create_memory_secret_store,
    create_noop_metrics,
    create_postgres_repository,
    create_prom_metrics,
    create_redis_secret_store,
    create_static_sensor,
    init_database_with_retry,
    init_database_with_retry_from_env,
    MemoryRepository,
    MemorySecretStore,
    PostgresRepository,
    RedisSecretStore,
    StaticSensor,
};

use domain::{MetricsPtr, RepositoryPtr, SecretStorePtr};
use sqlx::PgPool;

/// Build the HTTP router with every backend chosen from environment variables.
pub fn create_router() -> Result<Router> {
    // ---
    let config = AppConfig::from_env()?;
    create_router_from_config(&config)
}

/// Build the HTTP router from an already-loaded configuration.
pub fn create_router_from_config(config: &AppConfig) -> Result<Router> {
    // ---
    tracing_subscriber::fmt::try_init().ok(); // Ignores if already initialized

    let metrics = create_metrics(config)?;
    let coordinator = create_coordinator(config)?;

    Ok(build_router(coordinator, metrics))
}

/// Build the HTTP router around a Postgres pool the caller already opened.
///
/// `main` uses this after `init_database_with_retry` so the migrated pool is
/// the one serving requests.
pub fn create_router_with_pool(config: &AppConfig, pool: PgPool) -> Result<Router> {
    // ---
    tracing_subscriber::fmt::try_init().ok();

    let metrics = create_metrics(config)?;
    let coordinator = create_coordinator_with_pool(config, pool)?;

    Ok(build_router(coordinator, metrics))
}

fn create_metrics(config: &AppConfig) -> Result<MetricsPtr> {
    // ---
    if config.metrics_type == "prom" {
        create_prom_metrics()
    } else {
        create_noop_metrics()
    }
}

/// Wire a coordinator to the configured sensor and stores.
///
/// Postgres pools connect lazily, so this does not touch the network.
pub fn create_coordinator(config: &AppConfig) -> Result<BiometricCoordinator> {
    // ---
    let repository: RepositoryPtr = match (&config.remote_store, &config.database) {
        (RemoteStoreKind::Postgres, Some(db)) => create_postgres_repository(create_lazy_pool(db)?),
        (RemoteStoreKind::Postgres, None) => {
            anyhow::bail!("Postgres registration store selected without database configuration")
        }
        (RemoteStoreKind::Memory, _) => create_memory_repository(),
    };

    wire_coordinator(config, repository)
}

/// Wire a coordinator whose registration store is the given Postgres pool.
///
/// `config.remote_store` is not consulted; the pool decides.
pub fn create_coordinator_with_pool(
    config: &AppConfig,
    pool: PgPool,
) -> Result<BiometricCoordinator> {
    // ---
    wire_coordinator(config, create_postgres_repository(pool))
}

fn wire_coordinator(config: &AppConfig, repository: RepositoryPtr) -> Result<BiometricCoordinator> {
    // ---
    let secrets: SecretStorePtr = match (&config.secret_store, &config.redis) {
        (SecretStoreKind::Redis, Some(redis)) => create_redis_secret_store(redis)?,
        (SecretStoreKind::Redis, None) => {
            anyhow::bail!("Redis secret store selected without redis configuration")
        }
        (SecretStoreKind::Memory, _) => create_memory_secret_store(),
    };

    tracing::info!(
        "Coordinator wired: remote store {:?}, secret store {:?}",
        config.remote_store,
        config.secret_store
    );

    Ok(BiometricCoordinator::new(
        create_static_sensor(&config.sensor),
        secrets,
        repository,
        config.prompts.clone(),
        config.device.clone(),
    ))
}

/// Build the HTTP router around an existing coordinator.
pub fn build_router(coordinator: BiometricCoordinator, metrics: MetricsPtr) -> Router {
    // ---
    let app_state = AppState::new(coordinator, metrics);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .nest(
            "/biometric",
            Router::new()
                .route("/availability", get(check_availability))
                .route("/register", post(register))
                .route("/authenticate", post(authenticate))
                .route("/status/{user_id}", get(registration_status))
                .route("/registration/{user_id}", delete(revoke_registration))
                .route("/registrations/{user_id}", get(list_registrations)),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            track_http_request,
        ))
        .with_state(app_state)
}
