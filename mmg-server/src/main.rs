//! Movie memory game server (mmg-server) - Main entry point
//!
//! Loads the movie catalog, then serves the game over HTTP. The catalog
//! load runs in the background; the game reports the loading phase until
//! it is published.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use mmg_common::config::TomlConfig;
use mmg_common::EventBus;
use mmg_server::catalog::{CatalogLoader, HttpAssetValidator, HttpCatalogSource};
use mmg_server::{build_router, AppState, GameSession};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for mmg-server
#[derive(Parser, Debug)]
#[command(name = "mmg-server")]
#[command(about = "Movie memory card game server")]
#[command(version)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, env = "MMG_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "MMG_PORT")]
    port: Option<u16>,

    /// Catalog endpoint (overrides config file)
    #[arg(long, env = "MMG_CATALOG_URL")]
    catalog_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = TomlConfig::resolve(args.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(url) = args.catalog_url {
        config.catalog.url = url;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("mmg_server={0},mmg_common={0},tower_http=info", config.logging.level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting movie memory game server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let source = HttpCatalogSource::new(
        config.catalog.url.clone(),
        Duration::from_millis(config.catalog.fetch_timeout_ms),
    )
    .context("Failed to create catalog client")?;
    let validator = HttpAssetValidator::new(Duration::from_millis(config.catalog.probe_timeout_ms))
        .context("Failed to create poster validator")?;
    info!("Catalog source: {}", source.url());

    let loader = CatalogLoader::new(
        Arc::new(source),
        Arc::new(validator),
        config.catalog.min_required,
    );
    let session = Arc::new(GameSession::new(
        loader,
        config.game.number_of_cards,
        config.game.number_of_movies,
        EventBus::new(100),
    ));

    // Serve immediately; the game reports "loading" until the catalog lands
    session.reload();

    let app = build_router(AppState::new(Arc::clone(&session)));

    let ip = config
        .bind_address
        .parse::<std::net::IpAddr>()
        .with_context(|| format!("Invalid bind address: {}", config.bind_address))?;
    let addr = SocketAddr::new(ip, config.port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("mmg-server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
