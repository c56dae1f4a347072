mod database;
mod memory;
mod metrics;
mod secret_store;
mod sensor;

// Re-export the factory functions for easy access
pub use database::{
    create_lazy_pool, // ---
    create_postgres_repository,
    init_database_with_retry,
    init_database_with_retry_from_env,
    PostgresRepository,
};
pub use memory::{create_memory_repository, MemoryRepository};
pub use metrics::{create_noop_metrics, create_prom_metrics};
pub use secret_store::{
    create_memory_secret_store, // ---
    create_redis_secret_store,
    MemorySecretStore,
    RedisSecretStore,
};
pub use sensor::{create_static_sensor, StaticSensor};
