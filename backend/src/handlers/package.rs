//! Package HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::services::package::{
    BulkDeleteInput, CreatePackageInput, PackageService, UpdatePackageInput,
};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PackageListQuery {
    pub destination: Option<String>,
}

/// List packages, optionally filtered by destination
pub async fn list_packages(
    State(state): State<AppState>,
    Query(query): Query<PackageListQuery>,
) -> impl IntoResponse {
    let service = PackageService::new(state.repo.clone());

    match service.list_packages(query.destination.as_deref()).await {
        Ok(packages) => {
            (StatusCode::OK, Json(serde_json::json!({ "packages": packages }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Preview the next package id
pub async fn next_package_id(State(state): State<AppState>) -> impl IntoResponse {
    let service = PackageService::new(state.repo.clone());

    match service.next_package_id().await {
        Ok(id) => (StatusCode::OK, Json(serde_json::json!({ "id": id }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a single package
pub async fn get_package(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let service = PackageService::new(state.repo.clone());

    match service.get_package(&id).await {
        Ok(package) => (StatusCode::OK, Json(package)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a package
pub async fn create_package(
    State(state): State<AppState>,
    Json(input): Json<CreatePackageInput>,
) -> impl IntoResponse {
    let service = PackageService::new(state.repo.clone());

    match service.create_package(input).await {
        Ok(package) => (StatusCode::CREATED, Json(package)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Replace a package
pub async fn update_package(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdatePackageInput>,
) -> impl IntoResponse {
    let service = PackageService::new(state.repo.clone());

    match service.update_package(&id, input).await {
        Ok(package) => (StatusCode::OK, Json(package)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a package
pub async fn delete_package(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let service = PackageService::new(state.repo.clone());

    match service.delete_package(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete several packages at once
pub async fn bulk_delete_packages(
    State(state): State<AppState>,
    Json(input): Json<BulkDeleteInput>,
) -> impl IntoResponse {
    let service = PackageService::new(state.repo.clone());

    match service.delete_packages(input).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => e.into_response(),
    }
}
