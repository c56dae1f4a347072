mod noop_metrics;

pub use noop_metrics::NoopMetrics;
use crate::domain::MetricsPtr;
use std::sync::Arc;

/// Metrics backend used when `BIOREG_METRICS_TYPE` is unset or `noop`.
pub fn create() -> anyhow::Result<MetricsPtr> {
    // ---
    Ok(Arc::new(NoopMetrics))
}
