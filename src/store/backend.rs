/// Key/value persistence backends for the record store
use crate::error::SentinelResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Storage backend trait
///
/// A backend maps a fixed storage key to the serialized text of one
/// collection. It knows nothing about the shape of that text.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read the stored text for a key, `None` if the key was never written
    async fn get(&self, key: &str) -> SentinelResult<Option<String>>;

    /// Replace the stored text for a key
    async fn set(&self, key: &str, value: String) -> SentinelResult<()>;
}

/// In-process backend, the equivalent of one browser profile's storage
#[derive(Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn get(&self, key: &str) -> SentinelResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> SentinelResult<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_roundtrip() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("k").await.unwrap(), None);

        backend.set("k", "[1]".to_string()).await.unwrap();
        assert_eq!(backend.get("k").await.unwrap().as_deref(), Some("[1]"));

        backend.set("k", "[]".to_string()).await.unwrap();
        assert_eq!(backend.get("k").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let backend = MemoryBackend::new();
        let other = backend.clone();
        backend.set("k", "{}".to_string()).await.unwrap();
        assert_eq!(other.get("k").await.unwrap().as_deref(), Some("{}"));
    }
}
