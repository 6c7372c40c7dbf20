//! WebAssembly module for the Timber Yard Dispatch Platform
//!
//! Exposes the shared calculation core to the browser so on-screen figures
//! match the server and exported reports:
//! - Board-feet and length classification
//! - Load balance, progress and status color
//! - Length distribution table
//! - Next package id and group health

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

use shared::{
    calculate_length_distribution, calculate_load_balance, evaluate_group_health,
    generate_next_package_id, estimate_load_impact, LoadBalance, Package,
};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("timber-dispatch core loaded"));
}

/// Board-feet for `piece_count` boards of `length` feet
#[wasm_bindgen]
pub fn calculate_board_feet(length: i32, piece_count: i32) -> f64 {
    to_f64(shared::calculate_board_feet(length, piece_count))
}

/// Length category name (Cortos, Medios or Largos)
#[wasm_bindgen]
pub fn classify_length(length: i32) -> String {
    shared::classify_length(length).to_string()
}

/// Fill percentage of a load, capped at 100
#[wasm_bindgen]
pub fn calculate_load_progress(total_board_feet: f64) -> f64 {
    to_f64(shared::calculate_load_progress(to_decimal(total_board_feet)))
}

/// Status color tag for a fill percentage (ok, warning or info)
#[wasm_bindgen]
pub fn load_status_color(percentage: f64) -> String {
    shared::load_status_color(to_decimal(percentage)).to_string()
}

/// Next package id for the given packages (JSON array)
#[wasm_bindgen]
pub fn next_package_id(packages_json: &str) -> Result<String, JsValue> {
    let packages = parse_packages(packages_json)?;
    Ok(generate_next_package_id(&packages))
}

/// Load balance of the given packages, as JSON
#[wasm_bindgen]
pub fn load_balance(packages_json: &str) -> Result<String, JsValue> {
    let packages = parse_packages(packages_json)?;
    to_json(&calculate_load_balance(&packages))
}

/// Length distribution table of the given packages, as JSON
#[wasm_bindgen]
pub fn length_distribution(packages_json: &str) -> Result<String, JsValue> {
    let packages = parse_packages(packages_json)?;
    to_json(&calculate_length_distribution(&packages))
}

/// Health of a production group share, as JSON
#[wasm_bindgen]
pub fn group_health(group_label: &str, percentage: f64) -> Result<String, JsValue> {
    to_json(&evaluate_group_health(group_label, to_decimal(percentage)))
}

/// Impact of adding packages to a load with the given balance, as JSON
///
/// Returns `null` when there is nothing to simulate.
#[wasm_bindgen]
pub fn estimate_impact(
    balance_json: &str,
    length: i32,
    piece_count: i32,
    package_count: i32,
) -> Result<String, JsValue> {
    let current: LoadBalance = serde_json::from_str(balance_json)
        .map_err(|e| js_sys::Error::new(&format!("Invalid balance JSON: {}", e)))?;
    to_json(&estimate_load_impact(&current, length, piece_count, package_count))
}

fn parse_packages(json: &str) -> Result<Vec<Package>, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| js_sys::Error::new(&format!("Invalid packages JSON: {}", e)).into())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| js_sys::Error::new(&format!("Serialization failed: {}", e)).into())
}

fn to_f64(value: Decimal) -> f64 {
    value.to_string().parse().unwrap_or(0.0)
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACKAGES: &str = r#"[
        {"id": "PT-1270", "destination": "Carga Norte",
         "content": [{"length": 8, "piece_count": 100}]},
        {"id": "PT-1275", "destination": "Stock Libres",
         "content": [{"length": 16, "piece_count": 50}, {"length": 0, "piece_count": 3}]}
    ]"#;

    #[test]
    fn test_board_feet() {
        assert!((calculate_board_feet(8, 100) - 314.817).abs() < 1e-9);
        assert!((calculate_board_feet(1, 1) - 0.394).abs() < 1e-9);
    }

    #[test]
    fn test_classify_length() {
        assert_eq!(classify_length(9), "Cortos");
        assert_eq!(classify_length(10), "Medios");
        assert_eq!(classify_length(13), "Largos");
    }

    #[test]
    fn test_progress_and_status() {
        assert!((calculate_load_progress(5300.0) - 50.0).abs() < 1e-9);
        assert_eq!(calculate_load_progress(20000.0), 100.0);
        assert_eq!(load_status_color(95.0), "ok");
        assert_eq!(load_status_color(20.5), "warning");
        assert_eq!(load_status_color(20.0), "info");
    }

    #[test]
    fn test_next_package_id_from_json() {
        assert_eq!(next_package_id(PACKAGES).unwrap(), "PT-1276");
        assert_eq!(next_package_id("[]").unwrap(), "PT-1270");
    }

    #[test]
    fn test_load_balance_from_json() {
        let json = load_balance(PACKAGES).unwrap();
        let balance: LoadBalance = serde_json::from_str(&json).unwrap();
        assert_eq!(balance.total_board_feet.to_string(), "629.634");
        assert_eq!(balance.short_board_feet, balance.long_board_feet);
    }

    #[test]
    fn test_length_distribution_has_all_lengths() {
        let json = length_distribution(PACKAGES).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rows"].as_array().map(Vec::len), Some(14));
        assert_eq!(value["subtotals"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_group_health_json() {
        let json = group_health("Cortos (≤9')", 30.0).unwrap();
        assert!(json.contains("\"status\":\"alert\""));
    }

    #[test]
    fn test_estimate_nothing_to_simulate() {
        let balance = load_balance("[]").unwrap();
        assert_eq!(estimate_impact(&balance, 12, 0, 1).unwrap(), "null");
    }
}
