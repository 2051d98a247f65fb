//! Issue tracker REST API server
//!
//! Serves the in-memory issue store over HTTP. All issues are discarded when
//! the process stops.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use issues::storage::{InMemoryStorage, IssueStore};
use issues::IssueService;
use issues_server::config::{Cli, ServerConfig};
use issues_server::{build_app, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ServerConfig::resolve(&cli)?;

    logging::init(config.log_format, &config.log_filter);

    info!("Starting issue tracker API server...");

    let service = Arc::new(IssueService::new(InMemoryStorage::new()));
    let app = build_app(Arc::clone(&service), &config);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("Server listening on http://{}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let storage = service.storage();
    info!(
        projects = storage.project_names().len(),
        issues = storage.issue_count(),
        "Server stopped, discarding in-memory issues"
    );

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}
