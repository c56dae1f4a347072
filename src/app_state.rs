//! Application state management.
//!
//! This module defines the shared state structure passed to all Axum handlers
//! via the `State` extractor. It is cheaply cloneable: the coordinator holds
//! its collaborators behind `Arc`, and so does the metrics backend.

use crate::coordinator::BiometricCoordinator;
use crate::domain::MetricsPtr;

/// Shared application state passed to all Axum handlers.
///
/// This struct serves as the Dependency Injection container for the agent.
/// Handlers depend on the coordinator and on trait objects, never on the
/// concrete Postgres / Redis / sensor implementations.
///
/// # Lifecycle
///
/// 1. Created once in `build_router()` during startup
/// 2. Attached to the Axum router via `.with_state(app_state)`
/// 3. Cloned automatically by Axum for each incoming HTTP request
/// 4. Handlers extract via `State(state): State<AppState>`
#[derive(Clone)]
pub(crate) struct AppState {
    /// Biometric coordinator wired to the configured sensor and stores.
    coordinator: BiometricCoordinator,

    /// Metrics implementation for recording application events.
    ///
    /// Either Prometheus-backed (production) or no-op (testing/development).
    metrics: MetricsPtr,
}

impl AppState {
    // ---
    pub fn new(coordinator: BiometricCoordinator, metrics: MetricsPtr) -> Self {
        // ---
        AppState {
            coordinator,
            metrics,
        }
    }

    /// Get a reference to the biometric coordinator.
    pub(crate) fn coordinator(&self) -> &BiometricCoordinator {
        // ---
        &self.coordinator
    }

    /// Get a reference to the metrics implementation.
    pub(crate) fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }
}
