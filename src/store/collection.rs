/// Named collections and the record types stored in them
use crate::error::{SentinelError, SentinelResult};
use crate::models::{Admin, LogEntry, LoginRecord, NotificationEntry, RequestEntry};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

/// Where a newly inserted record lands in its collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOrder {
    /// Newest first
    Prepend,
    /// Registration order
    Append,
}

/// The six independently persisted slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Logs,
    Admins,
    Requests,
    Notifications,
    LoginHistory,
    CurrentUser,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Logs,
        Collection::Admins,
        Collection::Requests,
        Collection::Notifications,
        Collection::CurrentUser,
        Collection::LoginHistory,
    ];

    /// Storage key the collection is persisted under
    pub fn storage_key(&self) -> &'static str {
        match self {
            Collection::Logs => "sentinel_db_logs",
            Collection::Admins => "sentinel_db_admins",
            Collection::Requests => "sentinel_db_requests",
            Collection::Notifications => "sentinel_db_notices",
            Collection::LoginHistory => "sentinel_db_logins_history",
            Collection::CurrentUser => "sentinel_db_current_user",
        }
    }

    /// File name used when the collection is exported on its own
    pub fn export_file_name(&self) -> &'static str {
        match self {
            Collection::Logs => "logs.json",
            Collection::Admins => "admins.json",
            Collection::Requests => "requests.json",
            Collection::Notifications => "notifications.json",
            Collection::LoginHistory => "logins.json",
            Collection::CurrentUser => "current_user.json",
        }
    }

    pub fn insert_order(&self) -> InsertOrder {
        match self {
            Collection::Admins => InsertOrder::Append,
            _ => InsertOrder::Prepend,
        }
    }

    /// Whether the slot holds an array (every slot but the session)
    pub fn is_array(&self) -> bool {
        !matches!(self, Collection::CurrentUser)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Logs => "logs",
            Collection::Admins => "admins",
            Collection::Requests => "requests",
            Collection::Notifications => "notifications",
            Collection::LoginHistory => "logins",
            Collection::CurrentUser => "current-user",
        }
    }

    pub fn from_str(s: &str) -> SentinelResult<Self> {
        match s.to_lowercase().as_str() {
            "logs" => Ok(Collection::Logs),
            "admins" => Ok(Collection::Admins),
            "requests" => Ok(Collection::Requests),
            "notifications" | "notices" => Ok(Collection::Notifications),
            "logins" | "login-history" => Ok(Collection::LoginHistory),
            "current-user" | "user" => Ok(Collection::CurrentUser),
            _ => Err(SentinelError::Validation(format!("Invalid collection: {}", s))),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entity stored as one element of an array collection
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    const COLLECTION: Collection;

    fn id(&self) -> &str;
}

/// Records that may be upserted and deleted by id.
///
/// Login history does not implement this; it only grows
/// through `RecordStore::record_login`.
pub trait MutableRecord: Record {}

impl Record for LogEntry {
    const COLLECTION: Collection = Collection::Logs;

    fn id(&self) -> &str {
        &self.id
    }
}

impl MutableRecord for LogEntry {}

impl Record for Admin {
    const COLLECTION: Collection = Collection::Admins;

    fn id(&self) -> &str {
        &self.id
    }
}

impl MutableRecord for Admin {}

impl Record for RequestEntry {
    const COLLECTION: Collection = Collection::Requests;

    fn id(&self) -> &str {
        &self.id
    }
}

impl MutableRecord for RequestEntry {}

impl Record for NotificationEntry {
    const COLLECTION: Collection = Collection::Notifications;

    fn id(&self) -> &str {
        &self.id
    }
}

impl MutableRecord for NotificationEntry {}

impl Record for LoginRecord {
    const COLLECTION: Collection = Collection::LoginHistory;

    fn id(&self) -> &str {
        &self.id
    }
}
