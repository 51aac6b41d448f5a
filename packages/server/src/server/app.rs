//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::common::ApiError;
use crate::config::Config;
use crate::kernel::BaseDocumentStore;
use crate::server::routes::{
    create_laptop_handler, diagnostics_handler, list_brands_handler, list_laptops_handler,
    root_handler, schema_handler,
};

/// Shared application state
///
/// `store` is `None` when no database is configured; handlers that need it
/// report [`ApiError::StoreUnavailable`].
#[derive(Clone)]
pub struct AppState {
    pub store: Option<Arc<dyn BaseDocumentStore>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Option<Arc<dyn BaseDocumentStore>>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// The configured store, or the error handlers report without one.
    pub fn store(&self) -> Result<&dyn BaseDocumentStore, ApiError> {
        self.store.as_deref().ok_or(ApiError::StoreUnavailable)
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    // CORS configuration - allow any origin, method and header
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Introspection
        .route("/", get(root_handler))
        .route("/schema", get(schema_handler))
        .route("/test", get(diagnostics_handler))
        // Laptops
        .route(
            "/api/laptops",
            post(create_laptop_handler).get(list_laptops_handler),
        )
        .route("/api/brands", get(list_brands_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
