//! Prometheus recorder for the `metrics` facade
//!
//! Counters emitted anywhere in the process (for example
//! `chaos_errors_injected_total`) are collected by the recorder installed
//! here and rendered in the text exposition format on demand.

pub use metrics_exporter_prometheus::PrometheusHandle;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;

use super::TelemetryError;

/// Install the process-wide Prometheus recorder
///
/// Only one recorder can be installed per process; a second call fails.
pub fn install_metrics_recorder() -> Result<PrometheusHandle, TelemetryError> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| TelemetryError::Metrics(e.to_string()))?;
    info!("Prometheus metrics recorder installed");
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use metrics_exporter_prometheus::PrometheusBuilder;

    #[test]
    fn local_recorder_renders_counters() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            metrics::counter!("chaos_errors_injected_total", "journey" => "checkout").increment(2);
        });

        let rendered = handle.render();
        assert!(rendered.contains("chaos_errors_injected_total{journey=\"checkout\"} 2"));
    }
}
