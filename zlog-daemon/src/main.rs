use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use zlog_core::config::ZlogConfig;
use zlog_daemon::cli::DaemonCli;
use zlog_daemon::logging;
use zlog_daemon::orchestrator::Orchestrator;

fn main() -> Result<()> {
    let cli = DaemonCli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    let result = runtime.block_on(run(cli));

    // 표준 입력을 읽는 블로킹 스레드는 취소할 수 없으므로 기다리지 않음
    runtime.shutdown_timeout(Duration::from_millis(200));
    result
}

async fn run(cli: DaemonCli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ZlogConfig::load(path)
            .await
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ZlogConfig::from_env().context("invalid environment configuration")?,
    };
    cli.apply_overrides(&mut config);
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("config validation failed: {}", e))?;

    if cli.validate {
        println!("configuration is valid");
        return Ok(());
    }

    logging::init_tracing(&config.general)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "zlog starting");

    let mut orchestrator = Orchestrator::build_from_config(config)?;
    orchestrator.run().await?;

    tracing::info!("zlog shut down");
    Ok(())
}
