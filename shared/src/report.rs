//! Daily sales and stock report

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{unresolved_ingredients, UnresolvedIngredient};
use crate::models::{InventorySnapshot, StockItem, StockStatus};

/// Stock level line with its derived status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    pub id: Uuid,
    pub name: String,
    pub current_quantity: Decimal,
    pub minimum_threshold: Decimal,
    pub unit: String,
    pub status: StockStatus,
}

impl From<&StockItem> for StockLevel {
    fn from(item: &StockItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            current_quantity: item.current_quantity,
            minimum_threshold: item.minimum_threshold,
            unit: item.unit.clone(),
            status: item.status(),
        }
    }
}

/// Summary of today's sales log and the current stock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    /// Units sold, excluding cancelled sales
    pub items_sold: u64,
    pub items_cancelled: u64,
    pub transactions: usize,
    pub cancelled_transactions: usize,
    /// Items below their minimum threshold
    pub critical_stock: Vec<StockLevel>,
    pub stock_levels: Vec<StockLevel>,
    pub catalog_warnings: Vec<UnresolvedIngredient>,
}

impl DailyReport {
    pub fn from_snapshot(snapshot: &InventorySnapshot) -> Self {
        let (cancelled, active): (Vec<_>, Vec<_>) =
            snapshot.sales_log.iter().partition(|s| s.cancelled);

        let stock_levels: Vec<StockLevel> = snapshot.stock_items.iter().map(StockLevel::from).collect();
        let critical_stock = stock_levels
            .iter()
            .filter(|s| s.status == StockStatus::Low)
            .cloned()
            .collect();

        Self {
            items_sold: active.iter().map(|s| u64::from(s.quantity)).sum(),
            items_cancelled: cancelled.iter().map(|s| u64::from(s.quantity)).sum(),
            transactions: active.len(),
            cancelled_transactions: cancelled.len(),
            critical_stock,
            stock_levels,
            catalog_warnings: unresolved_ingredients(snapshot),
        }
    }

    /// True when no stock item is below its minimum
    pub fn all_stock_safe(&self) -> bool {
        self.critical_stock.is_empty()
    }
}
