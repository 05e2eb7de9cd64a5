//! Inventory service: the single writer of the in-memory snapshot
//!
//! Every mutating call locks the snapshot, runs the pure ledger/catalog
//! transform, swaps in the result and saves the whole snapshot before the
//! lock is released. A failed save leaves the new state committed in memory;
//! the next successful operation writes it out again.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{
    CancellationReport, DailyReport, InventorySnapshot, LedgerError, LedgerResult, Product,
    SaleRecord, StockItem, StockLevel,
};
use tokio::sync::Mutex;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::store::{SnapshotGateway, StoreResult};

/// Inventory service wrapping the ledger engine
#[derive(Clone)]
pub struct InventoryService {
    snapshot: Arc<Mutex<InventorySnapshot>>,
    gateway: SnapshotGateway,
}

/// Input for recording a sale
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordSaleInput {
    #[validate(length(min = 1, max = 100))]
    pub product_name: String,
    #[validate(range(min = 1))]
    pub quantity: i64,
    /// Defaults to the time the request is handled
    pub sold_at: Option<DateTime<Utc>>,
}

/// Input for cancelling a sale
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CancelSaleInput {
    #[validate(length(max = 200))]
    pub reason: String,
}

/// Input for restocking an item
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockInput {
    pub amount: Decimal,
}

/// Input for creating a stock item
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockItemInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 20))]
    pub unit: String,
    pub minimum_threshold: Decimal,
}

/// Input for creating a product
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Input for adding a stock item to a recipe
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRecipeIngredientInput {
    pub stock_item_id: Uuid,
}

/// Input for changing a recipe amount
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRecipeAmountInput {
    pub amount: Decimal,
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(snapshot: InventorySnapshot, gateway: SnapshotGateway) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(snapshot)),
            gateway,
        }
    }

    /// Load the persisted snapshot (seeding defaults) and wrap it
    pub async fn load(gateway: SnapshotGateway) -> StoreResult<Self> {
        let snapshot = gateway.load_or_seed().await?;
        tracing::info!(
            stock_items = snapshot.stock_items.len(),
            products = snapshot.products.len(),
            sales = snapshot.sales_log.len(),
            "Inventory snapshot loaded"
        );
        Ok(Self::new(snapshot, gateway))
    }

    pub fn gateway(&self) -> &SnapshotGateway {
        &self.gateway
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub async fn snapshot(&self) -> InventorySnapshot {
        self.snapshot.lock().await.clone()
    }

    /// Stock items with their derived status
    pub async fn stock_levels(&self) -> Vec<StockLevel> {
        let snapshot = self.snapshot.lock().await;
        snapshot.stock_items.iter().map(StockLevel::from).collect()
    }

    pub async fn products(&self) -> Vec<Product> {
        self.snapshot.lock().await.products.clone()
    }

    /// Sales log, newest first
    pub async fn sales_log(&self) -> Vec<SaleRecord> {
        self.snapshot.lock().await.sales_log.clone()
    }

    pub async fn daily_report(&self) -> DailyReport {
        DailyReport::from_snapshot(&*self.snapshot.lock().await)
    }

    // ========================================================================
    // Ledger operations
    // ========================================================================

    /// Record a sale
    pub async fn record_sale(&self, input: RecordSaleInput) -> AppResult<SaleRecord> {
        input.validate()?;
        let quantity = u32::try_from(input.quantity).map_err(|_| AppError::Validation {
            field: "quantity".to_string(),
            message: "Quantity is too large".to_string(),
            message_id: "Jumlah terlalu besar".to_string(),
        })?;
        let sold_at = input.sold_at.unwrap_or_else(Utc::now);

        let sale = self
            .commit("record_sale", |snapshot| {
                shared::record_sale(snapshot, &input.product_name, quantity, sold_at)
            })
            .await?;

        tracing::info!(
            sale_id = %sale.id,
            product = %sale.product_name,
            quantity = sale.quantity,
            "Sale recorded"
        );
        Ok(sale)
    }

    /// Cancel a sale and restore its stock
    pub async fn cancel_sale(&self, sale_id: Uuid, input: CancelSaleInput) -> AppResult<CancellationReport> {
        input.validate()?;

        let report = self
            .commit("cancel_sale", |snapshot| shared::cancel_sale(snapshot, sale_id, &input.reason))
            .await?;

        for key in &report.skipped {
            tracing::warn!(
                sale_id = %sale_id,
                ingredient = %key,
                "No stock item left to restore ingredient to; skipped"
            );
        }
        tracing::info!(sale_id = %sale_id, reason = %report.sale.cancel_reason, "Sale cancelled");
        Ok(report)
    }

    /// Add stock to an item
    pub async fn restock(&self, stock_item_id: Uuid, input: RestockInput) -> AppResult<StockItem> {
        let item = self
            .commit("restock", |snapshot| {
                let next = shared::restock(snapshot, stock_item_id, input.amount)?;
                let item = find_stock_item(&next, stock_item_id)?;
                Ok((next, item))
            })
            .await?;

        tracing::info!(
            stock_item = %item.name,
            added = %input.amount,
            current = %item.current_quantity,
            "Stock replenished"
        );
        Ok(item)
    }

    // ========================================================================
    // Catalog operations
    // ========================================================================

    pub async fn add_stock_item(&self, input: CreateStockItemInput) -> AppResult<StockItem> {
        input.validate()?;
        let item = self
            .commit("add_stock_item", |snapshot| {
                shared::add_stock_item(snapshot, &input.name, &input.unit, input.minimum_threshold)
            })
            .await?;
        tracing::info!(stock_item_id = %item.id, name = %item.name, "Stock item added");
        Ok(item)
    }

    pub async fn remove_stock_item(&self, stock_item_id: Uuid) -> AppResult<()> {
        self.commit("remove_stock_item", |snapshot| {
            shared::remove_stock_item(snapshot, stock_item_id).map(|next| (next, ()))
        })
        .await?;
        tracing::info!(stock_item_id = %stock_item_id, "Stock item removed");
        Ok(())
    }

    pub async fn add_product(&self, input: CreateProductInput) -> AppResult<Product> {
        input.validate()?;
        let product = self
            .commit("add_product", |snapshot| shared::add_product(snapshot, &input.name))
            .await?;
        tracing::info!(product_id = %product.id, name = %product.name, "Product added");
        Ok(product)
    }

    pub async fn remove_product(&self, product_id: Uuid) -> AppResult<()> {
        self.commit("remove_product", |snapshot| {
            shared::remove_product(snapshot, product_id).map(|next| (next, ()))
        })
        .await?;
        tracing::info!(product_id = %product_id, "Product removed");
        Ok(())
    }

    pub async fn add_ingredient_to_recipe(
        &self,
        product_id: Uuid,
        input: AddRecipeIngredientInput,
    ) -> AppResult<Product> {
        self.commit("add_ingredient_to_recipe", |snapshot| {
            let (next, _) = shared::add_ingredient_to_recipe(snapshot, product_id, input.stock_item_id)?;
            let product = find_product(&next, product_id)?;
            Ok((next, product))
        })
        .await
    }

    pub async fn set_recipe_amount(
        &self,
        product_id: Uuid,
        ingredient_key: &str,
        input: SetRecipeAmountInput,
    ) -> AppResult<Product> {
        self.commit("set_recipe_amount", |snapshot| {
            let next = shared::set_recipe_amount(snapshot, product_id, ingredient_key, input.amount)?;
            let product = find_product(&next, product_id)?;
            Ok((next, product))
        })
        .await
    }

    pub async fn remove_ingredient_from_recipe(
        &self,
        product_id: Uuid,
        ingredient_key: &str,
    ) -> AppResult<Product> {
        self.commit("remove_ingredient_from_recipe", |snapshot| {
            let next = shared::remove_ingredient_from_recipe(snapshot, product_id, ingredient_key)?;
            let product = find_product(&next, product_id)?;
            Ok((next, product))
        })
        .await
    }

    /// Apply a transform and persist the result while holding the lock
    async fn commit<T, F>(&self, operation: &'static str, transform: F) -> AppResult<T>
    where
        F: FnOnce(&InventorySnapshot) -> LedgerResult<(InventorySnapshot, T)>,
    {
        let mut snapshot = self.snapshot.lock().await;
        let (next, value) = transform(&*snapshot)?;
        *snapshot = next;

        if let Err(e) = self.gateway.save(&*snapshot).await {
            tracing::error!(
                operation,
                error = %e,
                "Snapshot committed in memory but could not be saved"
            );
            return Err(AppError::PersistenceFailure(e));
        }
        Ok(value)
    }
}

fn find_stock_item(snapshot: &InventorySnapshot, id: Uuid) -> LedgerResult<StockItem> {
    snapshot
        .stock_item(id)
        .cloned()
        .ok_or_else(|| LedgerError::NotFound("Stock item".to_string()))
}

fn find_product(snapshot: &InventorySnapshot, id: Uuid) -> LedgerResult<Product> {
    snapshot
        .product(id)
        .cloned()
        .ok_or_else(|| LedgerError::NotFound("Product".to_string()))
}
