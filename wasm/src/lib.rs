//! WebAssembly module for the StockOptame inventory ledger
//!
//! Provides client-side computation for:
//! - Stock status classification
//! - Sales, cancellations and restocking against a JSON snapshot
//! - The daily report
//!
//! Snapshots cross the boundary as JSON in the same shape the backend
//! persists, so the browser can keep working offline and sync later.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::{DailyReport, LedgerError};

fn ledger_error(err: LedgerError) -> String {
    format!("{}: {}", err.code(), err)
}

fn js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}

fn parse_snapshot(snapshot_json: &str) -> Result<InventorySnapshot, String> {
    serde_json::from_str(snapshot_json)
        .map_err(|e| format!("INVALID_INPUT: Invalid snapshot JSON: {}", e))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("INTERNAL_ERROR: {}", e))
}

fn parse_id(id: &str) -> Result<Uuid, String> {
    Uuid::parse_str(id).map_err(|_| "INVALID_INPUT: Invalid id".to_string())
}

/// Finite, representable quantities only; NaN and infinities are rejected
fn parse_quantity(value: f64, field: &str) -> Result<Decimal, String> {
    if !value.is_finite() {
        return Err(format!("INVALID_INPUT: {} must be a finite number", field));
    }
    Decimal::try_from(value).map_err(|_| format!("INVALID_INPUT: Invalid {}", field))
}

fn parse_timestamp(timestamp_ms: f64) -> Result<DateTime<Utc>, String> {
    if !timestamp_ms.is_finite() {
        return Err("INVALID_INPUT: Timestamp must be a finite number".to_string());
    }
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms as i64)
        .ok_or_else(|| "INVALID_INPUT: Invalid timestamp".to_string())
}

fn classify_status(current: f64, minimum: f64) -> Result<String, String> {
    let current = parse_quantity(current, "current")?;
    let minimum = parse_quantity(minimum, "minimum")?;
    Ok(classify_quantity(current, minimum).to_string())
}

fn sell(
    snapshot_json: &str,
    product_name: &str,
    quantity: u32,
    timestamp_ms: f64,
) -> Result<String, String> {
    let snapshot = parse_snapshot(snapshot_json)?;
    let timestamp = parse_timestamp(timestamp_ms)?;

    let (next, sale) =
        shared::record_sale(&snapshot, product_name, quantity, timestamp).map_err(ledger_error)?;
    to_json(&serde_json::json!({ "snapshot": next, "sale": sale }))
}

fn cancel(snapshot_json: &str, sale_id: &str, reason: &str) -> Result<String, String> {
    let snapshot = parse_snapshot(snapshot_json)?;
    let sale_id = parse_id(sale_id)?;

    let (next, report) = shared::cancel_sale(&snapshot, sale_id, reason).map_err(ledger_error)?;
    to_json(&serde_json::json!({ "snapshot": next, "report": report }))
}

fn replenish(snapshot_json: &str, stock_item_id: &str, amount: f64) -> Result<String, String> {
    let snapshot = parse_snapshot(snapshot_json)?;
    let stock_item_id = parse_id(stock_item_id)?;
    let amount = parse_quantity(amount, "amount")?;

    let next = shared::restock(&snapshot, stock_item_id, amount).map_err(ledger_error)?;
    to_json(&next)
}

fn report(snapshot_json: &str) -> Result<String, String> {
    let snapshot = parse_snapshot(snapshot_json)?;
    to_json(&DailyReport::from_snapshot(&snapshot))
}

/// Classify a quantity against its minimum: "low", "medium" or "good"
#[wasm_bindgen]
pub fn classify_stock_status(current: f64, minimum: f64) -> Result<String, JsValue> {
    classify_status(current, minimum).map_err(js_error)
}

/// Record a sale; returns `{ "snapshot": ..., "sale": ... }`
#[wasm_bindgen]
pub fn record_sale(
    snapshot_json: &str,
    product_name: &str,
    quantity: u32,
    timestamp_ms: f64,
) -> Result<String, JsValue> {
    sell(snapshot_json, product_name, quantity, timestamp_ms).map_err(js_error)
}

/// Cancel a sale; returns `{ "snapshot": ..., "report": ... }`
#[wasm_bindgen]
pub fn cancel_sale(snapshot_json: &str, sale_id: &str, reason: &str) -> Result<String, JsValue> {
    cancel(snapshot_json, sale_id, reason).map_err(js_error)
}

/// Add stock to an item; returns the new snapshot
#[wasm_bindgen]
pub fn restock(snapshot_json: &str, stock_item_id: &str, amount: f64) -> Result<String, JsValue> {
    replenish(snapshot_json, stock_item_id, amount).map_err(js_error)
}

#[wasm_bindgen]
pub fn daily_report(snapshot_json: &str) -> Result<String, JsValue> {
    report(snapshot_json).map_err(js_error)
}

/// The seeded stand: four stock items and four drinks
#[wasm_bindgen]
pub fn default_snapshot() -> Result<String, JsValue> {
    to_json(&InventorySnapshot::seeded()).map_err(js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_stock_status() {
        assert_eq!(classify_stock_status(450.0, 500.0).unwrap(), "low");
        assert_eq!(classify_stock_status(500.0, 500.0).unwrap(), "medium");
        assert_eq!(classify_stock_status(749.0, 500.0).unwrap(), "medium");
        assert_eq!(classify_stock_status(750.0, 500.0).unwrap(), "good");
        assert_eq!(classify_stock_status(0.0, 0.0).unwrap(), "good");
    }

    #[test]
    fn test_classify_rejects_non_finite() {
        for (current, minimum) in [(f64::NAN, f64::NAN), (f64::INFINITY, 500.0), (450.0, f64::NEG_INFINITY)] {
            let err = classify_status(current, minimum).unwrap_err();
            assert!(err.starts_with("INVALID_INPUT"), "{}", err);
        }
    }

    #[test]
    fn test_sale_rejects_non_finite_timestamp() {
        let snapshot = default_snapshot().unwrap();
        for timestamp in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = sell(&snapshot, "Espresso", 1, timestamp).unwrap_err();
            assert!(err.starts_with("INVALID_INPUT"), "{}", err);
        }
    }

    #[test]
    fn test_ledger_errors_carry_code() {
        let snapshot = default_snapshot().unwrap();
        let err = sell(&snapshot, "Espresso", 100, 0.0).unwrap_err();
        assert!(err.starts_with("INSUFFICIENT_STOCK: "), "{}", err);

        let coffee = serde_json::from_str::<InventorySnapshot>(&snapshot).unwrap().stock_items[1].id;
        let err = replenish(&snapshot, &coffee.to_string(), f64::NAN).unwrap_err();
        assert!(err.starts_with("INVALID_INPUT"), "{}", err);
    }

    #[test]
    fn test_record_sale_round_trip() {
        let snapshot = default_snapshot().unwrap();
        let result = record_sale(&snapshot, "Espresso", 1, 1_734_942_600_000.0).unwrap();

        let value: serde_json::Value = serde_json::from_str(&result).unwrap();
        let next: InventorySnapshot = serde_json::from_value(value["snapshot"].clone()).unwrap();
        let coffee = next.stock_items.iter().find(|s| s.name == "Coffee").unwrap();
        assert_eq!(coffee.current_quantity, Decimal::from(432));
        assert_eq!(value["sale"]["productName"], "Espresso");
        assert_eq!(value["sale"]["cancelled"], false);
    }

    #[test]
    fn test_cancel_and_daily_report() {
        let snapshot = default_snapshot().unwrap();
        let sold: serde_json::Value =
            serde_json::from_str(&record_sale(&snapshot, "Latte", 2, 0.0).unwrap()).unwrap();
        let sale_id = sold["sale"]["id"].as_str().unwrap().to_string();
        let sold_snapshot = sold["snapshot"].to_string();

        let cancelled: serde_json::Value = serde_json::from_str(
            &cancel_sale(&sold_snapshot, &sale_id, "Ubah Pesanan").unwrap(),
        )
        .unwrap();
        let report: DailyReport =
            serde_json::from_str(&daily_report(&cancelled["snapshot"].to_string()).unwrap())
                .unwrap();

        assert_eq!(report.items_sold, 0);
        assert_eq!(report.items_cancelled, 2);
        assert_eq!(report.cancelled_transactions, 1);
    }

    #[test]
    fn test_restock_updates_item() {
        let snapshot: InventorySnapshot =
            serde_json::from_str(&default_snapshot().unwrap()).unwrap();
        let coffee = snapshot.stock_items[1].id.to_string();
        let json = serde_json::to_string(&snapshot).unwrap();

        let next: InventorySnapshot =
            serde_json::from_str(&restock(&json, &coffee, 50.0).unwrap()).unwrap();
        assert_eq!(next.stock_items[1].current_quantity, Decimal::from(500));
    }
}
