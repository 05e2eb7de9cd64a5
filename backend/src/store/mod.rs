//! Persistence gateway for inventory snapshots
//!
//! The snapshot is stored as three independent JSON documents (`stocks`,
//! `todaySales`, `products`), each loaded and saved as a whole value.

mod file;
mod gateway;
mod memory;
mod postgres;

use async_trait::async_trait;
use shared::SnapshotKey;
use thiserror::Error;

pub use file::FileDocumentStore;
pub use gateway::SnapshotGateway;
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Storage errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Document {key} is corrupt: {message}")]
    Corrupt { key: String, message: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Whole-document key-value storage
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Load a document; `None` if it was never saved
    async fn load(&self, key: SnapshotKey) -> StoreResult<Option<serde_json::Value>>;

    /// Replace a document
    async fn save(&self, key: SnapshotKey, value: serde_json::Value) -> StoreResult<()>;

    /// Backend name for health reporting
    fn backend(&self) -> &'static str;

    /// Whether the backend is currently reachable
    async fn healthy(&self) -> bool {
        true
    }
}
