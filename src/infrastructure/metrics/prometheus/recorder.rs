use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::{Mutex, OnceLock};

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
static INSTALL: Mutex<()> = Mutex::new(());

/// Initialize the Prometheus recorder globally and store the handle.
///
/// Later calls are no-ops; the first installed recorder stays in place.
pub fn init_metrics() -> Result<()> {
    // ---
    let _guard = INSTALL
        .lock()
        .map_err(|_| anyhow::anyhow!("metrics install lock poisoned"))?;

    if HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = HANDLE.set(handle);

    Ok(())
}

/// Render the current metrics in Prometheus text format.
///
/// Empty until [`init_metrics`] has run.
pub fn render_metrics() -> String {
    // ---
    HANDLE.get().map(|h| h.render()).unwrap_or_default()
}
