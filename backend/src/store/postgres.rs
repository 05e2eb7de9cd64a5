//! PostgreSQL document store backed by a single `documents` table

use async_trait::async_trait;
use shared::SnapshotKey;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use super::{DocumentStore, StoreResult};

#[derive(Clone)]
pub struct PgDocumentStore {
    db: PgPool,
}

impl PgDocumentStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Connect a pool and run the embedded migrations
    pub async fn connect(url: &str, max_connections: u32, min_connections: u32) -> StoreResult<Self> {
        let db = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(url)
            .await?;

        sqlx::migrate!("./migrations").run(&db).await?;
        Ok(Self::new(db))
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn load(&self, key: SnapshotKey) -> StoreResult<Option<serde_json::Value>> {
        let value = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT value FROM documents WHERE key = $1",
        )
        .bind(key.as_str())
        .fetch_optional(&self.db)
        .await?;

        Ok(value)
    }

    async fn save(&self, key: SnapshotKey, value: serde_json::Value) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO documents (key, value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE
            SET value = EXCLUDED.value, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(key.as_str())
        .bind(value)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn healthy(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.db).await.is_ok()
    }
}
