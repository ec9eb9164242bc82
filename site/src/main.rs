//! Demo site entrypoint.
//!
//! Serves a homepage listing a few people plus a live gist feed streamed
//! in from the upstream API, a contact page, and a catch-all 404 page.
//! Keep this file minimal; application logic lives in the other modules.

mod app;
mod data;
mod error;
mod gists;
mod pages;
mod templates;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trama_core::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::default();
    let state = app::AppState::shared(&config)?;
    let router = app::router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "trama-site listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("trama-site stopped");
    Ok(())
}

/// Resolves on the first shutdown signal the process receives.
///
/// SIGTERM and Ctrl-C on Unix; Ctrl-C only elsewhere.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = sigterm => {}
    }
}
