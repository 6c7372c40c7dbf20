//! Timber Yard Dispatch Platform - Backend
//!
//! HTTP service over the shared calculation core: packages, loads, dashboard
//! reports and CSV exports.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod repository;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};

use repository::PackageRepository;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn PackageRepository>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(repo: Arc<dyn PackageRepository>, config: Config) -> Self {
        Self {
            repo,
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Timber Yard Dispatch Platform API v1.0"
}
