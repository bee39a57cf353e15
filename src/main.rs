//! Application entry point and server initialization
//!
//! Loads configuration, opens the link store and runs the HTTP server until a
//! shutdown signal arrives. Any startup failure ends the process.

use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use shortlink::config::{Config, DEFAULT_LOG_FILTER};
use shortlink::route::create_app;
use shortlink::state::AppState;
use shortlink::store::LinkStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env().context("invalid configuration")?;

    let store = LinkStore::open(&config.database_path)
        .with_context(|| format!("failed to open database at {}", config.database_path))?;

    let links = store.len().context("failed to read database")?;
    tracing::info!(path = %config.database_path, links, "database ready");

    match &config.static_dir {
        Some(dir) => tracing::info!(dir = %dir.display(), "serving static files"),
        None => tracing::info!("static file serving disabled"),
    }

    let state = AppState::new(store, config.base_url.clone());
    let app = create_app(state, config.static_dir.as_deref()).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    tracing::info!(
        addr = %config.listen_addr,
        base_url = %config.base_url,
        "server listening"
    );

    // The server keeps running until it receives SIGTERM or SIGINT
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

/// Resolves when Ctrl+C (SIGINT) or, on Unix, SIGTERM is received.
///
/// In-flight requests are allowed to finish before the server stops.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    // On non-Unix systems (Windows), only handle Ctrl+C
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received, stopping server");
}
