//! Loads and saves the full inventory snapshot through a document store

use std::sync::Arc;

use serde::de::DeserializeOwned;
use shared::{default_products, default_stock_items, InventorySnapshot, SnapshotKey};

use super::{DocumentStore, StoreError, StoreResult};

#[derive(Clone)]
pub struct SnapshotGateway {
    store: Arc<dyn DocumentStore>,
}

impl SnapshotGateway {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    pub async fn healthy(&self) -> bool {
        self.store.healthy().await
    }

    /// Load the snapshot, seeding and saving any document that does not exist yet
    pub async fn load_or_seed(&self) -> StoreResult<InventorySnapshot> {
        let stock_items = match self.load_document(SnapshotKey::Stocks).await? {
            Some(items) => items,
            None => {
                let items = default_stock_items();
                tracing::info!("Seeding default stock items");
                self.save_document(SnapshotKey::Stocks, &items).await?;
                items
            }
        };

        let products = match self.load_document(SnapshotKey::Products).await? {
            Some(products) => products,
            None => {
                let products = default_products();
                tracing::info!("Seeding default products");
                self.save_document(SnapshotKey::Products, &products).await?;
                products
            }
        };

        let sales_log = self
            .load_document(SnapshotKey::TodaySales)
            .await?
            .unwrap_or_default();

        Ok(InventorySnapshot {
            stock_items,
            products,
            sales_log,
        })
    }

    /// Save all three documents of the snapshot
    pub async fn save(&self, snapshot: &InventorySnapshot) -> StoreResult<()> {
        self.save_document(SnapshotKey::Stocks, &snapshot.stock_items).await?;
        self.save_document(SnapshotKey::TodaySales, &snapshot.sales_log).await?;
        self.save_document(SnapshotKey::Products, &snapshot.products).await?;
        Ok(())
    }

    async fn load_document<T: DeserializeOwned>(&self, key: SnapshotKey) -> StoreResult<Option<T>> {
        let Some(value) = self.store.load(key).await? else {
            return Ok(None);
        };
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    async fn save_document<T: serde::Serialize>(&self, key: SnapshotKey, value: &T) -> StoreResult<()> {
        let value = serde_json::to_value(value)?;
        self.store.save(key, value).await
    }
}
