/// Record Store
///
/// Persists the panel's collections as JSON text under fixed keys of a
/// [`StorageBackend`]. Every write is a read-modify-write of the whole
/// collection; writes within one store are serialized.

pub mod backend;
pub mod collection;
pub mod disk;
pub mod export;
pub mod seed;

pub use backend::{MemoryBackend, StorageBackend};
pub use collection::{Collection, InsertOrder, MutableRecord, Record};
pub use disk::DiskBackend;
pub use export::{ExportFile, FullBackup, RawView, StorageFootprint};

use crate::error::{SentinelError, SentinelResult};
use crate::models::{LoginAttempt, LoginRecord, UserAuth};
use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const ID_LENGTH: usize = 9;

/// Random lowercase alphanumeric record id
pub fn generate_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LENGTH)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

/// JSON-backed record store shared by every workflow manager
pub struct RecordStore {
    backend: Arc<dyn StorageBackend>,
    write_lock: Mutex<()>,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    /// Store over a fresh in-memory backend
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Write seed content to every slot that has never been persisted.
    ///
    /// Slots that already hold data (even malformed data) are left alone;
    /// blank slots count as never written. Returns the collections that
    /// were seeded.
    pub async fn initialize(&self) -> SentinelResult<Vec<Collection>> {
        let _guard = self.write_lock.lock().await;
        let now = Utc::now();
        let mut seeded = Vec::new();

        for collection in Collection::ALL {
            if self.stored_text(collection).await?.is_some() {
                continue;
            }

            let text = match collection {
                Collection::Logs => serde_json::to_string(&seed::logs(now))?,
                Collection::Admins => serde_json::to_string(&seed::admins())?,
                Collection::Requests => serde_json::to_string(&seed::requests(now))?,
                Collection::Notifications => serde_json::to_string(&seed::notifications(now))?,
                Collection::LoginHistory => serde_json::to_string(&seed::login_history())?,
                Collection::CurrentUser => serde_json::to_string(&seed::default_user())?,
            };

            self.backend.set(collection.storage_key(), text).await?;
            seeded.push(collection);
        }

        if !seeded.is_empty() {
            info!("Seeded collections: {:?}", seeded);
        }

        Ok(seeded)
    }

    /// All records of a collection in stored order.
    ///
    /// Absent or malformed content reads as an empty collection.
    pub async fn get_all<T: Record>(&self) -> SentinelResult<Vec<T>> {
        let collection = T::COLLECTION;
        let Some(text) = self.stored_text(collection).await? else {
            debug!("{} has not been initialized", collection);
            return Ok(Vec::new());
        };

        match serde_json::from_str(&text) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!("{} holds malformed JSON, reading as empty: {}", collection, e);
                Ok(Vec::new())
            }
        }
    }

    /// Look up a single record by id
    pub async fn get<T: Record>(&self, id: &str) -> SentinelResult<Option<T>> {
        Ok(self
            .get_all::<T>()
            .await?
            .into_iter()
            .find(|record| record.id() == id))
    }

    /// Insert or replace a record by id.
    ///
    /// A replaced record keeps its position; a new one is placed according
    /// to the collection's [`InsertOrder`].
    pub async fn save<T: MutableRecord>(&self, record: T) -> SentinelResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load_for_write::<T>().await?;
        upsert(&mut records, record);
        self.write_collection(T::COLLECTION, &records).await
    }

    /// Insert a record built around an id unused in its collection.
    ///
    /// `build` runs under the write lock and sees the current records, so
    /// uniqueness checks made there cannot race another writer. An error
    /// from `build` leaves the collection untouched.
    pub async fn insert_new<T, F>(&self, prefix: &str, build: F) -> SentinelResult<T>
    where
        T: MutableRecord,
        F: FnOnce(&[T], String) -> SentinelResult<T>,
    {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load_for_write::<T>().await?;

        let record = build(&records, unused_id(&records, prefix))?;
        upsert(&mut records, record.clone());
        self.write_collection(T::COLLECTION, &records).await?;
        Ok(record)
    }

    /// Modify one record in place as a single locked read-modify-write.
    ///
    /// Returns `None` for an unknown id. An error from `apply` leaves the
    /// collection untouched. `apply` must not change the record's id.
    pub async fn update<T, F>(&self, id: &str, apply: F) -> SentinelResult<Option<T>>
    where
        T: MutableRecord,
        F: FnOnce(&mut T) -> SentinelResult<()>,
    {
        let _guard = self.write_lock.lock().await;
        let collection = T::COLLECTION;
        let mut records = self.load_for_write::<T>().await?;

        let Some(record) = records.iter_mut().find(|r| r.id() == id) else {
            debug!("No {} record {} to update", collection, id);
            return Ok(None);
        };
        apply(record)?;
        let updated = record.clone();

        self.write_collection(collection, &records).await?;
        debug!("Updated {} record {}", collection, id);
        Ok(Some(updated))
    }

    /// Remove a record by id. Returns whether anything was removed; an
    /// unknown id leaves the stored collection untouched.
    pub async fn delete<T: MutableRecord>(&self, id: &str) -> SentinelResult<bool> {
        Ok(self.delete_checked::<T, _>(id, |_| Ok(())).await?.is_some())
    }

    /// Remove a record once `check` accepts it, under one write lock.
    /// Returns the removed record, `None` for an unknown id.
    pub async fn delete_checked<T, F>(&self, id: &str, check: F) -> SentinelResult<Option<T>>
    where
        T: MutableRecord,
        F: FnOnce(&T) -> SentinelResult<()>,
    {
        let _guard = self.write_lock.lock().await;
        let collection = T::COLLECTION;
        let mut records = self.load_for_write::<T>().await?;

        let Some(index) = records.iter().position(|r| r.id() == id) else {
            debug!("No {} record {} to delete", collection, id);
            return Ok(None);
        };
        check(&records[index])?;
        let removed = records.remove(index);

        self.write_collection(collection, &records).await?;
        info!("Deleted {} record {}", collection, id);
        Ok(Some(removed))
    }

    /// Append a login attempt as the newest history entry, with a freshly
    /// assigned id and the current time
    pub async fn record_login(&self, attempt: LoginAttempt) -> SentinelResult<LoginRecord> {
        let _guard = self.write_lock.lock().await;
        let mut history = self.load_for_write::<LoginRecord>().await?;

        let record = LoginRecord {
            id: unused_id(&history, ""),
            username: attempt.username,
            timestamp: Utc::now(),
            ip: attempt.ip,
            user_agent: attempt.user_agent,
            status: attempt.status,
            details: attempt.details,
        };

        history.insert(0, record.clone());
        self.write_collection(Collection::LoginHistory, &history).await?;

        info!(
            "Recorded {:?} login for {} from {}",
            record.status, record.username, record.ip
        );
        Ok(record)
    }

    /// The active session; falls back to the default session when the slot
    /// is absent or unreadable
    pub async fn get_current_user(&self) -> SentinelResult<UserAuth> {
        let text = self.stored_text(Collection::CurrentUser).await?;

        Ok(text
            .and_then(|t| match serde_json::from_str(&t) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!("Current user slot is malformed: {}", e);
                    None
                }
            })
            .unwrap_or_else(seed::default_user))
    }

    /// Replace the active session wholesale
    pub async fn set_current_user(&self, user: &UserAuth) -> SentinelResult<()> {
        let _guard = self.write_lock.lock().await;
        let text = serde_json::to_string(user)?;
        self.backend
            .set(Collection::CurrentUser.storage_key(), text)
            .await?;
        info!("Current user set to {} ({})", user.name, user.level);
        Ok(())
    }

    /// Literal stored text of a slot for diagnostic display, `"[]"` when
    /// the slot is absent or blank.
    ///
    /// Never parses, so it cannot fail on malformed content.
    pub async fn raw_content(&self, collection: Collection) -> SentinelResult<String> {
        Ok(self
            .stored_text(collection)
            .await?
            .unwrap_or_else(|| "[]".to_string()))
    }

    /// Total serialized size across every slot
    pub async fn storage_footprint(&self) -> SentinelResult<StorageFootprint> {
        let mut bytes = 0;
        for collection in Collection::ALL {
            if let Some(text) = self.backend.get(collection.storage_key()).await? {
                bytes += text.len();
            }
        }
        Ok(StorageFootprint { bytes })
    }

    /// Number of elements in an array slot, `None` if it cannot be parsed
    pub async fn count(&self, collection: Collection) -> SentinelResult<Option<usize>> {
        let text = self.raw_content(collection).await?;
        Ok(serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|v| v.as_array().map(|a| a.len())))
    }

    /// Strict read used before a write: malformed content is an error so it
    /// is never overwritten by a partial view of the collection
    async fn load_for_write<T: Record>(&self) -> SentinelResult<Vec<T>> {
        let collection = T::COLLECTION;
        match self.stored_text(collection).await? {
            None => Ok(Vec::new()),
            Some(text) => serde_json::from_str(&text).map_err(|e| {
                SentinelError::Storage(format!(
                    "{} holds malformed JSON and cannot be updated: {}",
                    collection, e
                ))
            }),
        }
    }

    /// Stored text of a slot; blank content reads as never written
    async fn stored_text(&self, collection: Collection) -> SentinelResult<Option<String>> {
        Ok(self
            .backend
            .get(collection.storage_key())
            .await?
            .filter(|text| !text.trim().is_empty()))
    }

    async fn write_collection<T: Serialize>(
        &self,
        collection: Collection,
        records: &[T],
    ) -> SentinelResult<()> {
        let text = serde_json::to_string(records)?;
        self.backend.set(collection.storage_key(), text).await
    }

    pub(crate) fn backend(&self) -> &dyn StorageBackend {
        self.backend.as_ref()
    }

    pub(crate) async fn lock_writes(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }
}

fn upsert<T: Record>(records: &mut Vec<T>, record: T) {
    let collection = T::COLLECTION;
    match records.iter().position(|r| r.id() == record.id()) {
        Some(index) => {
            debug!("Replacing {} record {}", collection, record.id());
            records[index] = record;
        }
        None => {
            debug!("Inserting {} record {}", collection, record.id());
            match collection.insert_order() {
                InsertOrder::Prepend => records.insert(0, record),
                InsertOrder::Append => records.push(record),
            }
        }
    }
}

fn unused_id<T: Record>(records: &[T], prefix: &str) -> String {
    loop {
        let id = format!("{}{}", prefix, generate_id());
        if !records.iter().any(|r| r.id() == id) {
            return id;
        }
    }
}
