use anyhow::Result;
use biometric_registry::{
    bind_addr_from_env, create_router_from_config, create_router_with_pool, init_database_with_retry,
    AppConfig, RemoteStoreKind,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber to log to stdout
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;

    // Wait for the registration store and apply migrations before serving,
    // then serve from that same pool
    let app = match (config.remote_store, &config.database) {
        (RemoteStoreKind::Postgres, Some(db)) => {
            let pool = init_database_with_retry(db).await?;
            create_router_with_pool(&config, pool)?
        }
        _ => create_router_from_config(&config)?,
    };

    let endpoint = bind_addr_from_env();

    info!("Starting at endpoint:{}", endpoint);
    info!("Starting Biometric Registry agent v{}...", env!("CARGO_PKG_VERSION"));

    let listener = tokio::net::TcpListener::bind(&endpoint).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    // ---
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
