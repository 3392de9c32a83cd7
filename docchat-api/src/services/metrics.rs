//! Metrics collection and Prometheus export.
//!
//! Initializes the metrics exporter and provides the /metrics endpoint
//! handler, plus the document lifecycle counters recorded by the handlers.

use crate::models::FileType;
use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use service_core::error::AppError;
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder.
///
/// Call once at startup, before any metrics are recorded. Without it the
/// counters below are no-ops.
pub fn init_metrics() -> Result<(), AppError> {
    if METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        AppError::InternalError(anyhow::anyhow!(
            "Failed to install Prometheus recorder: {}",
            e
        ))
    })?;

    // A concurrent initializer may have won; its handle is equivalent.
    let _ = METRICS_HANDLE.set(handle);
    Ok(())
}

/// Get the current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

pub fn record_upload(file_type: FileType) {
    counter!("documents_uploaded_total", "file_type" => file_type.as_str()).increment(1);
}

pub fn record_upload_rejected(reason: &'static str) {
    counter!("document_upload_rejected_total", "reason" => reason).increment(1);
}

pub fn record_extraction_failure(file_type: FileType) {
    counter!("document_extraction_failures_total", "file_type" => file_type.as_str()).increment(1);
}

pub fn record_delete(cleanup_failures: usize) {
    counter!("documents_deleted_total").increment(1);
    if cleanup_failures > 0 {
        counter!("document_cleanup_failures_total").increment(cleanup_failures as u64);
    }
}
