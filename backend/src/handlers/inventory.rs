//! HTTP handlers for sales and stock endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::{CancellationReport, InventorySnapshot, SaleRecord, StockItem, StockLevel, CANCEL_REASONS};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::inventory::{CancelSaleInput, RecordSaleInput, RestockInput};
use crate::AppState;

/// Get the full inventory snapshot
pub async fn get_snapshot(State(state): State<AppState>) -> Json<InventorySnapshot> {
    Json(state.inventory.snapshot().await)
}

/// List stock items with their status
pub async fn list_stock_levels(State(state): State<AppState>) -> Json<Vec<StockLevel>> {
    Json(state.inventory.stock_levels().await)
}

/// Restock an item
pub async fn restock_item(
    State(state): State<AppState>,
    Path(stock_item_id): Path<Uuid>,
    Json(input): Json<RestockInput>,
) -> AppResult<Json<StockItem>> {
    let item = state.inventory.restock(stock_item_id, input).await?;
    Ok(Json(item))
}

/// List today's sales, newest first
pub async fn list_sales(State(state): State<AppState>) -> Json<Vec<SaleRecord>> {
    Json(state.inventory.sales_log().await)
}

/// Record a sale
pub async fn record_sale(
    State(state): State<AppState>,
    Json(input): Json<RecordSaleInput>,
) -> AppResult<(StatusCode, Json<SaleRecord>)> {
    let sale = state.inventory.record_sale(input).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

/// Cancel a sale
pub async fn cancel_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
    Json(input): Json<CancelSaleInput>,
) -> AppResult<Json<CancellationReport>> {
    let report = state.inventory.cancel_sale(sale_id, input).await?;
    Ok(Json(report))
}

/// Preset cancellation reasons
pub async fn list_cancel_reasons() -> Json<Vec<&'static str>> {
    Json(CANCEL_REASONS.to_vec())
}
