//! Tokio / Axum entry-point for the weather API server.
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use weather_backend_lib::{config::Settings, create_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "weather-server", about = "Token-protected weather forecast API")]
struct Cli {
    /// TOML configuration file; defaults to ./config.toml and ./config.json
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `server.host`
    #[arg(long)]
    host: Option<String>,

    /// Override `server.port`
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .context("failed to load configuration")?;

    if let Some(host) = cli.host {
        settings.server.host = host;
    }
    if let Some(port) = cli.port {
        settings.server.port = port;
    }
    settings.validate().context("invalid configuration")?;

    init_tracing(&settings.logging.level, &settings.logging.format);

    let addr = settings.bind_addr()?;
    let purge_every = Duration::from_secs(settings.auth.purge_interval_secs);

    // Create application state
    let state = AppState::new(settings).context("failed to initialise application state")?;
    let purge_task = state.refresh_tokens.clone().spawn_purge_task(purge_every);

    let app = create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    serve(listener, app, shutdown_signal()).await?;

    purge_task.abort();
    tracing::info!("server stopped");
    Ok(())
}

/// Serve `app` on `listener` until `shutdown` resolves
async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    if format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
