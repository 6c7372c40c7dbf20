//! Catalog handlers

use axum::{extract::State, Json};

use crate::config::CatalogConfig;
use crate::AppState;

/// Picklists for the packing form, as configured
pub async fn get_catalog(State(state): State<AppState>) -> Json<CatalogConfig> {
    Json(state.config.catalog.clone())
}
