use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod logging;
pub mod mcp;
pub mod registry;
pub mod store;

use registry::CapabilityRegistry;
use store::{ConfigSnapshot, UserDirectory};

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<CapabilityRegistry>,
    pub config_snapshot: Arc<ConfigSnapshot>,
    pub directory: Arc<UserDirectory>,
}

impl AppState {
    pub fn new(
        registry: CapabilityRegistry,
        config_snapshot: ConfigSnapshot,
        directory: UserDirectory,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            config_snapshot: Arc::new(config_snapshot),
            directory: Arc::new(directory),
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(http::handlers::health))
        .route("/.well-known/mcp", get(http::handlers::discovery))
        .route("/mcp", post(http::handlers::mcp_endpoint))
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}
