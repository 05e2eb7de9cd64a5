//! Local file document store: one `<key>.json` file per document

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use shared::SnapshotKey;

use super::{DocumentStore, StoreError, StoreResult};

pub struct FileDocumentStore {
    data_dir: PathBuf,
}

impl FileDocumentStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path(&self, key: SnapshotKey) -> PathBuf {
        self.data_dir.join(format!("{}.json", key.as_str()))
    }
}

fn io_error(key: SnapshotKey) -> impl FnOnce(std::io::Error) -> StoreError {
    move |source| StoreError::Io {
        key: key.to_string(),
        source,
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn load(&self, key: SnapshotKey) -> StoreResult<Option<serde_json::Value>> {
        let bytes = match tokio::fs::read(self.path(key)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(key)(e)),
        };

        let value = serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(Some(value))
    }

    async fn save(&self, key: SnapshotKey, value: serde_json::Value) -> StoreResult<()> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(io_error(key))?;

        // Write then rename so a crash never leaves a half-written document
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(&value)?;
        tokio::fs::write(&tmp, bytes).await.map_err(io_error(key))?;
        tokio::fs::rename(&tmp, &path).await.map_err(io_error(key))?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}
