//! Load HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::services::export::ExportService;
use crate::services::load::{CreateLoadInput, EstimateQuery, LoadService};
use crate::AppState;

/// List loads with their fill level
pub async fn list_loads(State(state): State<AppState>) -> impl IntoResponse {
    let service = LoadService::new(state.repo.clone());

    match service.list_loads().await {
        Ok(loads) => (StatusCode::OK, Json(serde_json::json!({ "loads": loads }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a load
pub async fn create_load(
    State(state): State<AppState>,
    Json(input): Json<CreateLoadInput>,
) -> impl IntoResponse {
    let service = LoadService::new(state.repo.clone());

    match service.create_load(input).await {
        Ok(load) => (StatusCode::CREATED, Json(load)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Load detail with balance, progress and distribution
pub async fn get_load(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let service = LoadService::new(state.repo.clone());

    match service.get_load_detail(&name).await {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Dispatch a load
pub async fn dispatch_load(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let service = LoadService::new(state.repo.clone());

    match service.dispatch_load(&name).await {
        Ok(load) => (StatusCode::OK, Json(load)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Reopen a dispatched load
pub async fn reopen_load(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let service = LoadService::new(state.repo.clone());

    match service.reopen_load(&name).await {
        Ok(load) => (StatusCode::OK, Json(load)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a load; its packages go back to stock
pub async fn delete_load(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let service = LoadService::new(state.repo.clone());

    match service.delete_load(&name).await {
        Ok(moved) => (
            StatusCode::OK,
            Json(serde_json::json!({ "moved_to_stock": moved })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Simulate adding packages to a load
pub async fn estimate_load(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<EstimateQuery>,
) -> impl IntoResponse {
    let service = LoadService::new(state.repo.clone());

    match service.estimate_impact(&name, query).await {
        Ok(impact) => (StatusCode::OK, Json(impact)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Download a load report as CSV
pub async fn export_load(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let service = ExportService::new(LoadService::new(state.repo.clone()));

    match service.export_load(&name).await {
        Ok(file) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", file.file_name),
                ),
            ],
            file.content,
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
