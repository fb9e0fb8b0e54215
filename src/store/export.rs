/// Diagnostics, export and import of stored collections
use super::{Collection, RecordStore};
use crate::error::{SentinelError, SentinelResult};
use crate::models::{Admin, LogEntry, LoginRecord, NotificationEntry, RequestEntry, UserAuth};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const FULL_BACKUP_FILE_NAME: &str = "sentinel_full_backup.json";

/// Banner shown above stored text that failed to parse
pub const MALFORMED_BANNER: &str = "// JSON formatting error: showing raw stored content";

/// A downloadable JSON document
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

/// Body of `sentinel_full_backup.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullBackup {
    pub logins: Vec<LoginRecord>,
    pub admins: Vec<Admin>,
    pub logs: Vec<LogEntry>,
    pub requests: Vec<RequestEntry>,
    pub exported_at: DateTime<Utc>,
}

/// Sum of the serialized sizes of all slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageFootprint {
    pub bytes: usize,
}

impl StorageFootprint {
    pub fn kilobytes(&self) -> f64 {
        self.bytes as f64 / 1024.0
    }
}

impl fmt::Display for StorageFootprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} KB", self.kilobytes())
    }
}

/// How the raw-file viewer presents a slot's stored text
#[derive(Debug, Clone, PartialEq)]
pub enum RawView {
    Empty,
    Formatted(String),
    Malformed { raw: String, error: String },
}

impl RawView {
    pub fn render(text: &str) -> Self {
        if text.trim().is_empty() {
            return RawView::Empty;
        }

        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(value) => match serde_json::to_string_pretty(&value) {
                Ok(pretty) => RawView::Formatted(pretty),
                Err(e) => RawView::Malformed {
                    raw: text.to_string(),
                    error: e.to_string(),
                },
            },
            Err(e) => RawView::Malformed {
                raw: text.to_string(),
                error: e.to_string(),
            },
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, RawView::Malformed { .. })
    }
}

impl fmt::Display for RawView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawView::Empty => f.write_str("// Empty file"),
            RawView::Formatted(pretty) => f.write_str(pretty),
            RawView::Malformed { raw, error } => {
                writeln!(f, "{}", MALFORMED_BANNER)?;
                writeln!(f, "// {}", error)?;
                f.write_str(raw)
            }
        }
    }
}

impl RecordStore {
    /// Raw-viewer presentation of a slot
    pub async fn raw_view(&self, collection: Collection) -> SentinelResult<RawView> {
        let text = self.raw_content(collection).await?;
        let view = RawView::render(&text);
        if view.is_malformed() {
            warn!("{} failed to parse for display", collection);
        }
        Ok(view)
    }

    /// Indented JSON of a single slot, named `<collection>.json`
    pub async fn export_collection(&self, collection: Collection) -> SentinelResult<ExportFile> {
        let contents = match collection {
            Collection::Logs => pretty(&self.get_all::<LogEntry>().await?)?,
            Collection::Admins => pretty(&self.get_all::<Admin>().await?)?,
            Collection::Requests => pretty(&self.get_all::<RequestEntry>().await?)?,
            Collection::Notifications => pretty(&self.get_all::<NotificationEntry>().await?)?,
            Collection::LoginHistory => pretty(&self.get_all::<LoginRecord>().await?)?,
            Collection::CurrentUser => pretty(&self.get_current_user().await?)?,
        };

        Ok(ExportFile {
            file_name: collection.export_file_name().to_string(),
            contents,
        })
    }

    /// Login history, admins, logs and requests in one document
    pub async fn full_backup(&self) -> SentinelResult<FullBackup> {
        Ok(FullBackup {
            logins: self.get_all().await?,
            admins: self.get_all().await?,
            logs: self.get_all().await?,
            requests: self.get_all().await?,
            exported_at: Utc::now(),
        })
    }

    pub async fn export_full_backup(&self) -> SentinelResult<ExportFile> {
        let backup = self.full_backup().await?;
        Ok(ExportFile {
            file_name: FULL_BACKUP_FILE_NAME.to_string(),
            contents: pretty(&backup)?,
        })
    }

    /// Replace a slot with previously exported content.
    ///
    /// The text must deserialize as the slot's entity type; nothing is
    /// written otherwise. Returns the number of records imported.
    pub async fn import_collection(
        &self,
        collection: Collection,
        text: &str,
    ) -> SentinelResult<usize> {
        let (normalized, count) = match collection {
            Collection::Logs => normalize::<Vec<LogEntry>>(text, |v| v.len())?,
            Collection::Admins => normalize::<Vec<Admin>>(text, |v| v.len())?,
            Collection::Requests => normalize::<Vec<RequestEntry>>(text, |v| v.len())?,
            Collection::Notifications => {
                normalize::<Vec<NotificationEntry>>(text, |v| v.len())?
            }
            Collection::LoginHistory => normalize::<Vec<LoginRecord>>(text, |v| v.len())?,
            Collection::CurrentUser => normalize::<UserAuth>(text, |_| 1)?,
        };

        let _guard = self.lock_writes().await;
        self.backend()
            .set(collection.storage_key(), normalized)
            .await?;

        info!("Imported {} record(s) into {}", count, collection);
        Ok(count)
    }
}

impl ExportFile {
    /// Write the document into `dir`, creating it if needed
    pub async fn write_to(&self, dir: &Path) -> SentinelResult<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, &self.contents).await?;
        info!("Exported {:?}", path);
        Ok(path)
    }
}

fn pretty<T: Serialize + ?Sized>(value: &T) -> SentinelResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn normalize<T>(text: &str, count: impl Fn(&T) -> usize) -> SentinelResult<(String, usize)>
where
    T: Serialize + serde::de::DeserializeOwned,
{
    let value: T = serde_json::from_str(text)
        .map_err(|e| SentinelError::Validation(format!("Import rejected: {}", e)))?;
    Ok((serde_json::to_string(&value)?, count(&value)))
}
