//! Route definitions for the Timber Yard Dispatch Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/catalog", get(handlers::get_catalog))
        .nest("/packages", package_routes())
        .nest("/loads", load_routes())
        .nest("/reports", report_routes())
}

/// Package routes
fn package_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_packages).post(handlers::create_package),
        )
        .route("/next-id", get(handlers::next_package_id))
        .route("/bulk-delete", post(handlers::bulk_delete_packages))
        .route(
            "/:id",
            get(handlers::get_package)
                .put(handlers::update_package)
                .delete(handlers::delete_package),
        )
}

/// Load routes
fn load_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_loads).post(handlers::create_load))
        .route(
            "/:name",
            get(handlers::get_load).delete(handlers::delete_load),
        )
        .route("/:name/dispatch", post(handlers::dispatch_load))
        .route("/:name/reopen", post(handlers::reopen_load))
        .route("/:name/estimate", get(handlers::estimate_load))
        .route("/:name/export", get(handlers::export_load))
}

/// Report routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_reports))
        .route("/groups", get(handlers::get_group_balance))
        .route("/production", get(handlers::get_production))
}
