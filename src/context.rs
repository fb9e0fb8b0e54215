/// Application context and dependency injection
use crate::{
    config::{SentinelConfig, StorageBackendKind},
    error::{SentinelError, SentinelResult},
    store::{DiskBackend, MemoryBackend, RecordStore, StorageBackend},
    workflow::{NoticeBoard, PunishmentManager, SessionManager, StaffManager},
};
use std::sync::Arc;

/// Application context holding all shared services
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<SentinelConfig>,
    pub store: Arc<RecordStore>,
    pub punishments: Arc<PunishmentManager>,
    pub staff: Arc<StaffManager>,
    pub notices: Arc<NoticeBoard>,
    pub sessions: Arc<SessionManager>,
}

impl AppContext {
    /// Create a new application context from configuration
    pub async fn new(config: SentinelConfig) -> SentinelResult<Self> {
        config.validate()?;

        let backend: Arc<dyn StorageBackend> = match config.storage.backend {
            StorageBackendKind::Disk => {
                Self::ensure_directories(&config).await?;
                Arc::new(DiskBackend::new(config.storage.data_directory.clone()))
            }
            StorageBackendKind::Memory => Arc::new(MemoryBackend::new()),
        };

        let store = Arc::new(RecordStore::new(backend));
        let seeded = store.initialize().await?;
        if !seeded.is_empty() {
            tracing::info!("Seeded {} collection(s)", seeded.len());
        }

        Ok(Self {
            punishments: Arc::new(PunishmentManager::new(store.clone())),
            staff: Arc::new(StaffManager::new(store.clone())),
            notices: Arc::new(NoticeBoard::new(store.clone())),
            sessions: Arc::new(SessionManager::new(store.clone())),
            config: Arc::new(config),
            store,
        })
    }

    /// Ensure the data directory exists
    async fn ensure_directories(config: &SentinelConfig) -> SentinelResult<()> {
        let dir = &config.storage.data_directory;
        if !dir.exists() {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                SentinelError::Internal(format!("Failed to create directory {:?}: {}", dir, e))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Collection;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_disk_context_seeds_files() {
        let dir = tempdir().unwrap();
        let mut config = SentinelConfig::in_memory();
        config.storage.backend = StorageBackendKind::Disk;
        config.storage.data_directory = dir.path().join("data");

        let ctx = AppContext::new(config).await.unwrap();
        assert_eq!(ctx.store.count(Collection::Admins).await.unwrap(), Some(2));
        assert!(dir.path().join("data/sentinel_db_admins.json").exists());
    }

    #[tokio::test]
    async fn test_memory_context_shares_store() {
        let ctx = AppContext::new(SentinelConfig::in_memory()).await.unwrap();
        let user = ctx.sessions.current_user().await.unwrap();
        ctx.punishments
            .delete_log(&user, "1")
            .await
            .unwrap();
        assert_eq!(ctx.store.count(Collection::Logs).await.unwrap(), Some(0));
    }
}
