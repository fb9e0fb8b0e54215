/// Disk-based storage backend
use crate::{
    error::{SentinelError, SentinelResult},
    store::StorageBackend,
};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

/// Disk storage backend
///
/// Stores each key as `{base}/{key}.json`.
#[derive(Clone)]
pub struct DiskBackend {
    base_path: PathBuf,
}

impl DiskBackend {
    /// Create a new disk storage backend
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }

    async fn ensure_base_dir(&self) -> SentinelResult<()> {
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            SentinelError::Storage(format!(
                "Failed to create data directory {:?}: {}",
                self.base_path, e
            ))
        })
    }
}

#[async_trait]
impl StorageBackend for DiskBackend {
    async fn get(&self, key: &str) -> SentinelResult<Option<String>> {
        match fs::read_to_string(self.key_path(key)).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SentinelError::Storage(format!(
                "Failed to read {}: {}",
                key, e
            ))),
        }
    }

    async fn set(&self, key: &str, value: String) -> SentinelResult<()> {
        self.ensure_base_dir().await?;

        // Readers only ever see a complete file: write aside, then rename
        let path = self.key_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).await.map_err(|e| {
            SentinelError::Storage(format!("Failed to write {}: {}", key, e))
        })?;
        fs::rename(&tmp, &path).await.map_err(|e| {
            SentinelError::Storage(format!("Failed to replace {}: {}", key, e))
        })?;

        Ok(())
    }
}
