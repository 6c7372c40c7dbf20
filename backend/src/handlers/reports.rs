//! Report HTTP handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::services::reports::{ReportFilter, ReportService};
use crate::AppState;

/// Board-feet by destination group
pub async fn get_reports(State(state): State<AppState>) -> impl IntoResponse {
    let service = ReportService::new(state.repo.clone());

    match service.summary().await {
        Ok(reports) => (StatusCode::OK, Json(reports)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Length-group balance with health
pub async fn get_group_balance(
    State(state): State<AppState>,
    Query(filter): Query<ReportFilter>,
) -> impl IntoResponse {
    let service = ReportService::new(state.repo.clone());

    match service.groups(&filter).await {
        Ok(groups) => (StatusCode::OK, Json(serde_json::json!({ "groups": groups }))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Production KPIs and daily volume
pub async fn get_production(
    State(state): State<AppState>,
    Query(filter): Query<ReportFilter>,
) -> impl IntoResponse {
    let service = ReportService::new(state.repo.clone());

    match service.production(&filter).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => e.into_response(),
    }
}
