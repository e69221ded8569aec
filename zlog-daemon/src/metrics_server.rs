//! Prometheus metrics HTTP server.
//!
//! Uses the built-in HTTP listener from `metrics-exporter-prometheus`
//! to expose the ingest, store and hub counters.
//!
//! # Usage
//!
//! ```ignore
//! let config = MetricsConfig { enabled: true, ..Default::default() };
//! install_metrics_recorder(&config)?;
//! ```

use std::net::SocketAddr;

use anyhow::Result;
use metrics_exporter_prometheus::PrometheusBuilder;
use zlog_core::config::MetricsConfig;

/// Resolve the metrics listen address from configuration.
pub fn listen_addr(config: &MetricsConfig) -> Result<SocketAddr> {
    let host = config.listen_addr.trim();
    let addr = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, config.port)
    } else {
        format!("{}:{}", host, config.port)
    };
    addr.parse()
        .map_err(|e| anyhow::anyhow!("invalid metrics listen address '{}': {}", addr, e))
}

/// Install the global metrics recorder and start the HTTP listener.
///
/// This function should be called once per process.
///
/// # Errors
///
/// - The listen address is invalid
/// - Socket binding fails
/// - Global recorder is already installed
pub fn install_metrics_recorder(config: &MetricsConfig) -> Result<()> {
    let addr = listen_addr(config)?;

    if addr.ip().is_unspecified() {
        tracing::warn!(
            listen_addr = %addr,
            "metrics endpoint is exposed on all interfaces"
        );
    }

    tracing::info!(listen_addr = %addr, "installing Prometheus metrics recorder");

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("failed to install metrics recorder: {}", e))?;

    zlog_core::metrics::describe_all();

    tracing::info!(listen_addr = %addr, "Prometheus metrics endpoint active");
    Ok(())
}
