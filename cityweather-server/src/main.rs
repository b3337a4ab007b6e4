//! Binary crate for the `cityweather` HTTP service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and loading configuration
//! - Tracing initialization
//! - Wiring the router to the upstream client

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cityweather_core::{Config, VisualCrossingClient};

mod error;
mod routes;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather-server", version, about = "Weather proxy HTTP API")]
struct Args {
    /// Path to a TOML config file. Falls back to $CITYWEATHER_CONFIG,
    /// then ./cityweather.toml, then environment variables alone.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;
    let client = VisualCrossingClient::new(&config)?;

    let app = routes::router(routes::AppState { client });

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
