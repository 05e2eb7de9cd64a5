//! Sales log models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Recipe;

/// One sale transaction in the append-only sales log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: Uuid,
    pub product_name: String,
    pub quantity: u32,
    /// Recipe as it was when the sale was made
    pub recipe_snapshot: Recipe,
    /// Stock items actually deducted; empty for records written before it existed
    #[serde(default)]
    pub consumption: Vec<StockConsumption>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default)]
    pub cancel_reason: String,
}

impl SaleRecord {
    /// Stock item the given recipe key was deducted from
    pub fn consumed_item(&self, ingredient_key: &str) -> Option<Uuid> {
        self.consumption
            .iter()
            .find(|c| c.ingredient_key == ingredient_key)
            .map(|c| c.stock_item_id)
    }
}

/// Amount deducted from one stock item for one recipe key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockConsumption {
    pub ingredient_key: String,
    pub stock_item_id: Uuid,
    pub amount: Decimal,
}
