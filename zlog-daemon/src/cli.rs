//! CLI argument definitions for the `zlog` binary.
//!
//! Uses `clap` v4 derive macros to parse command-line arguments.
//! Flags take precedence over the config file and environment variables.

use std::path::PathBuf;

use clap::Parser;

use zlog_core::config::ZlogConfig;

/// Pipe logs into zlog and watch them live in the browser.
///
/// Reads log lines from stdin, keeps the most recent entries in memory
/// and serves them over HTTP (`/logs`) and Server-Sent Events (`/events`).
#[derive(Parser, Debug, Default)]
#[command(name = "zlog")]
#[command(version, about, long_about = None)]
pub struct DaemonCli {
    /// Path to a zlog.toml configuration file.
    ///
    /// Without it, defaults plus `ZLOG_*` environment overrides are used.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind.
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind.
    #[arg(long)]
    pub port: Option<u16>,

    /// Max log entries to keep in memory.
    #[arg(long)]
    pub max: Option<usize>,

    /// Include sentMs in SSE payloads.
    #[arg(long)]
    pub debug_latency: bool,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Override log format (json, pretty).
    #[arg(long)]
    pub log_format: Option<String>,

    /// Validate configuration and exit without starting the server.
    #[arg(long)]
    pub validate: bool,
}

impl DaemonCli {
    /// Apply flag overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, config: &mut ZlogConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(max) = self.max {
            config.store.max_entries = max;
        }
        if self.debug_latency {
            config.server.debug_latency = true;
        }
        if let Some(level) = &self.log_level {
            config.general.log_level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.general.log_format = format.clone();
        }
    }
}
