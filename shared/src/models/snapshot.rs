//! Inventory snapshot and default seed data

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Product, SaleRecord, StockItem};

/// Full in-memory state: the unit of persistence and of ledger transforms
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventorySnapshot {
    pub stock_items: Vec<StockItem>,
    pub products: Vec<Product>,
    /// Newest first
    pub sales_log: Vec<SaleRecord>,
}

impl InventorySnapshot {
    pub fn new(stock_items: Vec<StockItem>, products: Vec<Product>) -> Self {
        Self {
            stock_items,
            products,
            sales_log: Vec::new(),
        }
    }

    /// Snapshot seeded with the default catalog and an empty sales log
    pub fn seeded() -> Self {
        Self::new(default_stock_items(), default_products())
    }

    pub fn stock_item(&self, id: Uuid) -> Option<&StockItem> {
        self.stock_items.iter().find(|s| s.id == id)
    }

    pub fn product(&self, id: Uuid) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn product_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    pub fn sale(&self, id: Uuid) -> Option<&SaleRecord> {
        self.sales_log.iter().find(|s| s.id == id)
    }
}

/// Default stock when nothing has been persisted yet
pub fn default_stock_items() -> Vec<StockItem> {
    vec![
        StockItem::new("Milk", "ml", Decimal::from(1000)).with_quantity(Decimal::from(2200)),
        StockItem::new("Coffee", "g", Decimal::from(500)).with_quantity(Decimal::from(450)),
        StockItem::new("Water", "ml", Decimal::from(2000)).with_quantity(Decimal::from(5000)),
        StockItem::new("Cups", "pcs", Decimal::from(30)).with_quantity(Decimal::from(45)),
    ]
}

/// Default products when nothing has been persisted yet
pub fn default_products() -> Vec<Product> {
    vec![
        Product::new("Latte")
            .with_ingredient("milk", Decimal::from(120))
            .with_ingredient("coffee", Decimal::from(16)),
        Product::new("Cappuccino")
            .with_ingredient("milk", Decimal::from(100))
            .with_ingredient("coffee", Decimal::from(18)),
        Product::new("Americano")
            .with_ingredient("water", Decimal::from(150))
            .with_ingredient("coffee", Decimal::from(16)),
        Product::new("Espresso").with_ingredient("coffee", Decimal::from(18)),
    ]
}
