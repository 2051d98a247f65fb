//! Issue tracker REST API server library
//!
//! Exposes the create/list/update/delete surface of the `issues` crate under
//! `/api/issues/:project`, plus the configuration and logging used by the
//! `issues-server` binary.

pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod routes;

use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use issues::storage::IssueStore;
use issues::IssueService;

// Re-export for convenience
pub use routes::create_routes;

/// Build the full application: API routes under `/api` plus middleware.
pub fn build_app<S: IssueStore + 'static>(
    service: Arc<IssueService<S>>,
    config: &ServerConfig,
) -> Router {
    let mut app = Router::new().nest("/api", create_routes(service));

    if config.cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app.layer(TraceLayer::new_for_http())
}
