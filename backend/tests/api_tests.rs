//! HTTP API tests through the axum router
//!
//! Requests go through `create_app` with an in-memory repository, so routing,
//! extraction, error mapping and JSON shapes are exercised together.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use timber_dispatch_backend::repository::InMemoryRepository;
use timber_dispatch_backend::config::CatalogConfig;
use timber_dispatch_backend::{create_app, AppState, Config};

// ============================================================================
// Helpers
// ============================================================================

fn app() -> Router {
    create_app(AppState::new(
        Arc::new(InMemoryRepository::new()),
        Config::default(),
    ))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_reports_repository() {
    let app = app();

    let (status, body) = send_json(&app, Method::GET, "/api/v1/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["repository"], "connected");
}

#[tokio::test]
async fn test_catalog_serves_configured_lists() {
    let config = Config {
        catalog: CatalogConfig {
            species: vec!["Pino".into(), "Eucalipto".into()],
            certifications: vec![],
            ..CatalogConfig::default()
        },
        ..Config::default()
    };
    let app = create_app(AppState::new(Arc::new(InMemoryRepository::new()), config));

    let (status, body) = send_json(&app, Method::GET, "/api/v1/catalog", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["species"], json!(["Pino", "Eucalipto"]));
    assert_eq!(body["finishes"], json!(["S4S", "Cepillado"]));
    assert_eq!(body["certifications"], json!([]));
    assert_eq!(body["drying"], json!(["KD", "AD"]));
}

// ============================================================================
// Packages
// ============================================================================

#[tokio::test]
async fn test_package_lifecycle() {
    let app = app();

    let (status, body) = send_json(&app, Method::GET, "/api/v1/packages/next-id", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "PT-1270");

    let (status, created) = send_json(
        &app,
        Method::POST,
        "/api/v1/packages",
        Some(json!({
            "destination": "Stock Libres",
            "species": "Pino",
            "content": [{ "length": 8, "piece_count": 100 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], "PT-1270");
    assert_eq!(created["total_board_feet"], "314.817");
    assert_eq!(created["content"][0]["board_feet"], "314.817");

    let (status, fetched) = send_json(&app, Method::GET, "/api/v1/packages/PT-1270", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send_json(
        &app,
        Method::PUT,
        "/api/v1/packages/PT-1270",
        Some(json!({
            "destination": "Stock Libres",
            "content": [{ "length": 20, "piece_count": 1 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["total_board_feet"], "7.870");

    let (status, _) = send(&app, Method::DELETE, "/api/v1/packages/PT-1270", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send_json(&app, Method::GET, "/api/v1/packages/PT-1270", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_duplicate_package_is_conflict() {
    let app = app();
    let body = json!({
        "id": "PT-2000",
        "destination": "Stock Libres",
        "content": [{ "length": 10, "piece_count": 5 }]
    });

    let (status, _) = send_json(&app, Method::POST, "/api/v1/packages", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, error) = send_json(&app, Method::POST, "/api/v1/packages", Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"]["code"], "DUPLICATE_ENTRY");
    assert!(error["error"]["message_es"].is_string());
}

#[tokio::test]
async fn test_invalid_content_is_bad_request() {
    let app = app();

    let (status, error) = send_json(
        &app,
        Method::POST,
        "/api/v1/packages",
        Some(json!({
            "destination": "Stock Libres",
            "content": [{ "length": 30, "piece_count": 5 }]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(error["error"]["field"], "content");
}

#[tokio::test]
async fn test_update_cannot_change_package_id() {
    let app = app();
    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/v1/packages",
        Some(json!({
            "id": "PT-1270",
            "destination": "Stock Libres",
            "content": [{ "length": 8, "piece_count": 100 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, updated) = send_json(
        &app,
        Method::PUT,
        "/api/v1/packages/PT-1270",
        Some(json!({
            "id": "PT-5000",
            "destination": "Stock Libres",
            "content": [{ "length": 10, "piece_count": 20 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], "PT-1270");

    let (status, _) = send_json(&app, Method::GET, "/api/v1/packages/PT-5000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, listed) = send_json(&app, Method::GET, "/api/v1/packages", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["packages"].as_array().map(Vec::len), Some(1));
    assert_eq!(listed["packages"][0]["id"], "PT-1270");
}

// ============================================================================
// Loads
// ============================================================================

#[tokio::test]
async fn test_load_flow() {
    let app = app();

    let (status, load) = send_json(
        &app,
        Method::POST,
        "/api/v1/loads",
        Some(json!({ "name": "Carga Norte" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(load["number"], "1ra Carga");
    assert_eq!(load["status"], "active");

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/v1/packages",
        Some(json!({
            "destination": "Carga Norte",
            "content": [{ "length": 8, "piece_count": 100 }, { "length": 16, "piece_count": 50 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, detail) = send_json(&app, Method::GET, "/api/v1/loads/Carga%20Norte", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["balance"]["total_board_feet"], "629.634");
    assert_eq!(detail["status_color"], "info");
    assert_eq!(detail["distribution"]["rows"].as_array().map(Vec::len), Some(14));

    let (status, impact) = send_json(
        &app,
        Method::GET,
        "/api/v1/loads/Carga%20Norte/estimate?length=12&piece_count=100&package_count=3",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(impact["current"]["total_board_feet"], "629.634");

    let (status, csv) = send(&app, Method::GET, "/api/v1/loads/Carga%20Norte/export", None).await;
    assert_eq!(status, StatusCode::OK);
    let csv = String::from_utf8(csv).unwrap();
    assert!(csv.starts_with("Carga,Carga Norte"));

    let (status, dispatched) =
        send_json(&app, Method::POST, "/api/v1/loads/Carga%20Norte/dispatch", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dispatched["status"], "dispatched");

    let (status, error) =
        send_json(&app, Method::POST, "/api/v1/loads/Carga%20Norte/dispatch", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["error"]["code"], "INVALID_STATE_TRANSITION");

    let (status, reports) = send_json(&app, Method::GET, "/api/v1/reports", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reports["shipped_board_feet"], "629.634");

    let (status, deleted) =
        send_json(&app, Method::DELETE, "/api/v1/loads/Carga%20Norte", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["moved_to_stock"], 1);
}

// ============================================================================
// Reports
// ============================================================================

#[tokio::test]
async fn test_reports_on_empty_yard() {
    let app = app();

    let (status, reports) = send_json(&app, Method::GET, "/api/v1/reports", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reports["total_board_feet"], "0");

    let (status, groups) = send_json(&app, Method::GET, "/api/v1/reports/groups", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(groups["groups"], json!([]));

    let (status, production) = send_json(
        &app,
        Method::GET,
        "/api/v1/reports/production?from=2026-01-01&to=2026-12-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(production["kpis"]["package_count"], 0);
}

#[tokio::test]
async fn test_production_filtered_by_load_query() {
    let app = app();
    for name in ["Carga A", "Carga B"] {
        let (status, _) =
            send_json(&app, Method::POST, "/api/v1/loads", Some(json!({ "name": name }))).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    for (destination, length) in [("Carga A", 8), ("Carga B", 16), ("Stock Libres", 10)] {
        let (status, _) = send_json(
            &app,
            Method::POST,
            "/api/v1/packages",
            Some(json!({
                "destination": destination,
                "content": [{ "length": length, "piece_count": 10 }]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, production) = send_json(
        &app,
        Method::GET,
        "/api/v1/reports/production?loads=Carga%20A,Carga%20B",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(production["kpis"]["package_count"], 2);

    let (status, groups) =
        send_json(&app, Method::GET, "/api/v1/reports/groups?loads=Carga%20A", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(groups["groups"].as_array().map(Vec::len), Some(1));
    assert_eq!(groups["groups"][0]["group"], "Cortos (≤9')");
}
