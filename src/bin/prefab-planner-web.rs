//! Prefab Planner Web Server Binary
//!
//! Serves the configurator over a REST API for a browser renderer.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (port 3001, configured data directory)
//! prefab-planner-web
//!
//! # Specify port and data directory
//! prefab-planner-web --port 8080 --data-dir ./plans
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prefab_planner::config::Config;
use prefab_planner::web;

/// Prefab Planner Web Server - REST API for the configurator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Directory holding the saved configuration.
    /// Defaults to the `[paths] data_dir` setting.
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().unwrap_or_default();

    let data_dir = match args.data_dir {
        Some(path) => path,
        None => config.data_dir().context("Failed to resolve data directory")?,
    };

    info!("Data directory: {}", data_dir.display());

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("Invalid host or port")?;

    web::run_server(config, data_dir, addr).await
}
