//! In-memory document store

use std::collections::HashMap;

use async_trait::async_trait;
use shared::SnapshotKey;
use tokio::sync::RwLock;

use super::{DocumentStore, StoreResult};

/// Keeps documents in process memory; contents are lost on restart
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<SnapshotKey, serde_json::Value>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn load(&self, key: SnapshotKey) -> StoreResult<Option<serde_json::Value>> {
        Ok(self.documents.read().await.get(&key).cloned())
    }

    async fn save(&self, key: SnapshotKey, value: serde_json::Value) -> StoreResult<()> {
        self.documents.write().await.insert(key, value);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
