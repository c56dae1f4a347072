// Test helpers are intentionally partially used
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use biometric_registry::domain::DeviceDescriptor;
use biometric_registry::{
    build_router, create_noop_metrics, create_router, create_static_sensor, BiometricCoordinator,
    MemoryRepository, MemorySecretStore, PromptConfig, SensorConfig,
};
use reqwest::Client;
use std::sync::{Arc, Once};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;
use tower::ServiceExt;

macro_rules! set_env_if_unset {
    // ---
    ($key:expr, $val:expr) => {
        if std::env::var($key).is_err() {
            std::env::set_var($key, $val);
        }
    };
}

static INIT: Once = Once::new();
static TRACING_INIT: Once = Once::new();

// ============================================================================
// Test Setup
// ============================================================================

/// Initialize tracing once for all tests in a binary.
pub fn init_tracing() {
    // ---
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_ansi(false) // No colorization, makes logs easier to read.
            .with_test_writer()
            .try_init();
    });
}

/// Point the env-driven router at in-memory backends, once.
pub fn setup_test_env() {
    // ---
    init_tracing();
    INIT.call_once(|| {
        // ---
        set_env_if_unset!("BIOREG_REMOTE_STORE", "memory");
        set_env_if_unset!("BIOREG_SECRET_STORE", "memory");
        set_env_if_unset!("BIOREG_DEVICE_MODEL", "TestPhone");
        set_env_if_unset!("BIOREG_DEVICE_OS", "TestOS");
        set_env_if_unset!("BIOREG_METRICS_TYPE", "noop");
    });
}

/// Router over in-memory stores, with handles kept for inspection.
pub struct TestApp {
    pub router: Router,
    pub repo: Arc<MemoryRepository>,
    pub secrets: Arc<MemorySecretStore>,
}

impl TestApp {
    // ---
    pub fn new(sensor: SensorConfig) -> Self {
        // ---
        init_tracing();

        let repo = Arc::new(MemoryRepository::new());
        let secrets = Arc::new(MemorySecretStore::new());
        let coordinator = BiometricCoordinator::new(
            create_static_sensor(&sensor),
            secrets.clone(),
            repo.clone(),
            PromptConfig::default(),
            DeviceDescriptor {
                model_name: Some("TestPhone".to_string()),
                os_name: Some("TestOS".to_string()),
            },
        );
        let metrics = create_noop_metrics().expect("noop metrics");

        Self {
            router: build_router(coordinator, metrics),
            repo,
            secrets,
        }
    }

    /// Send one request through the router; returns status and JSON body.
    pub async fn call(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        // ---
        send(&self.router, method, uri, body).await
    }
}

/// Send one request through a clone of `router`; returns status and JSON body.
///
/// A body that is not JSON comes back as `Value::Null`.
pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    // ---
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

pub struct TestServer {
    pub addr: std::net::SocketAddr,
    pub client: Client,
}

impl TestServer {
    // ---
    pub async fn new() -> Self {
        // --

        let app = create_router().expect("Should be able to create router");
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(100)).await;

        let client = Client::new();

        Self { addr, client }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }
}
