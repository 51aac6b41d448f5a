// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use laptop_core::kernel::{BaseDocumentStore, MongoDocumentStore};
use laptop_core::server::{build_app, AppState};
use laptop_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,laptop_core=debug,mongodb=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting Laptop Store API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Create the store client once; it is shared by every request
    let store: Option<Arc<dyn BaseDocumentStore>> = match config.database() {
        Some((url, name)) => {
            tracing::info!("Connecting to database...");
            let store = MongoDocumentStore::connect(url, name)
                .await
                .context("Failed to create database client")?;
            Some(Arc::new(store))
        }
        None => {
            tracing::warn!("DATABASE_URL or DATABASE_NAME not set; running without a database");
            None
        }
    };

    let port = config.port;
    let app = build_app(AppState::new(store.clone(), config));

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Diagnostics: http://localhost:{}/test", port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(store) = store {
        store.close().await;
    }
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
