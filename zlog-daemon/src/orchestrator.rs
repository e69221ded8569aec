//! Process orchestration -- assembly, lifecycle management and shutdown.
//!
//! The [`Orchestrator`] is the central coordinator of the `zlog` binary.
//! It builds the log pipeline from configuration, wires the HTTP server
//! to the pipeline's store and hub, and runs until a shutdown signal.
//!
//! # Startup Order
//!
//! 1. Metrics recorder (optional)
//! 2. Log pipeline (hub loop, then stdin ingestion)
//! 3. HTTP server
//!
//! # Shutdown Order
//!
//! 1. Cancel the shared token (ingestion, hub and server observe it)
//! 2. Stop the pipeline and await its tasks
//! 3. Await the HTTP server's graceful shutdown

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, BufReader};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use zlog_core::config::ZlogConfig;
use zlog_core::pipeline::{HealthStatus, Pipeline};
use zlog_pipeline::{LogPipeline, LogPipelineBuilder, LogStore, PipelineConfig};

use crate::metrics_server;
use crate::server::{self, AppState};

/// The main daemon orchestrator.
pub struct Orchestrator {
    /// Loaded and validated configuration.
    config: ZlogConfig,
    /// Ingest/store/broadcast pipeline.
    pipeline: LogPipeline,
    /// Root shutdown token; the pipeline holds a child of it.
    cancel: CancellationToken,
}

impl Orchestrator {
    /// Build from configuration, reading log lines from stdin.
    pub fn build_from_config(config: ZlogConfig) -> Result<Self> {
        Self::build_with_source(config, BufReader::new(tokio::io::stdin()))
    }

    /// Build from configuration with an explicit line source.
    pub fn build_with_source<R>(config: ZlogConfig, source: R) -> Result<Self>
    where
        R: AsyncBufRead + Send + Unpin + 'static,
    {
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("config validation failed: {}", e))?;

        if config.metrics.enabled {
            metrics_server::install_metrics_recorder(&config.metrics)?;
            tracing::info!(port = config.metrics.port, "metrics endpoint enabled");
        }

        let cancel = CancellationToken::new();
        let pipeline = LogPipelineBuilder::new()
            .config(PipelineConfig::from_core(&config))
            .source(source)
            .cancel_token(cancel.clone())
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build log pipeline: {}", e))?;

        tracing::info!(
            max_entries = pipeline.store().capacity(),
            debug_latency = config.server.debug_latency,
            "orchestrator initialized"
        );

        Ok(Self {
            config,
            pipeline,
            cancel,
        })
    }

    /// Bind the configured HTTP address.
    pub async fn bind(&self) -> Result<TcpListener> {
        let host = self.config.server.host.as_str();
        let port = self.config.server.port;
        TcpListener::bind((host, port))
            .await
            .with_context(|| format!("failed to bind {}:{}", host, port))
    }

    /// Start everything, print the banner and block until SIGTERM/SIGINT.
    pub async fn run(&mut self) -> Result<()> {
        let listener = self.bind().await?;
        println!(
            "Server running on {}",
            server::banner_url(
                &self.config.server.host,
                self.config.server.port,
                self.config.server.debug_latency,
            )
        );

        self.run_until(listener, async {
            match wait_for_shutdown_signal().await {
                Ok(signal) => tracing::info!(signal, "shutdown signal received"),
                Err(e) => tracing::error!(error = %e, "signal handling failed, shutting down"),
            }
        })
        .await
    }

    /// Run the pipeline and serve `listener` until `shutdown` resolves.
    pub async fn run_until<F>(&mut self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        self.pipeline
            .start()
            .await
            .map_err(|e| anyhow::anyhow!("failed to start log pipeline: {}", e))?;

        let mut server_task = tokio::spawn(server::serve(
            listener,
            self.app_state(),
            self.cancel.clone(),
        ));

        let early_exit = tokio::select! {
            () = shutdown => None,
            joined = &mut server_task => Some(joined),
        };

        self.shutdown().await?;

        let joined = match early_exit {
            Some(joined) => joined,
            None => server_task.await,
        };
        joined.map_err(|e| anyhow::anyhow!("http server task failed: {}", e))?
    }

    async fn shutdown(&mut self) -> Result<()> {
        tracing::info!("shutting down");
        self.cancel.cancel();
        self.pipeline
            .stop()
            .await
            .map_err(|e| anyhow::anyhow!("failed to stop log pipeline: {}", e))
    }

    /// Handler state backed by this orchestrator's pipeline.
    pub fn app_state(&self) -> AppState {
        AppState::new(self.pipeline.store(), self.pipeline.hub())
    }

    pub fn store(&self) -> Arc<LogStore> {
        self.pipeline.store()
    }

    pub async fn health(&self) -> HealthStatus {
        self.pipeline.health_check().await
    }

    /// Get a reference to the loaded configuration.
    pub fn config(&self) -> &ZlogConfig {
        &self.config
    }
}

/// Wait for a shutdown signal (SIGTERM or SIGINT).
///
/// Returns the name of the signal that triggered the shutdown.
#[cfg(unix)]
async fn wait_for_shutdown_signal() -> Result<&'static str> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("failed to install SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("failed to install SIGINT handler: {}", e))?;

    Ok(tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    })
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("failed to install Ctrl-C handler: {}", e))?;
    Ok("ctrl-c")
}
