/// Staff announcements
use super::AdminLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationCategory {
    Update,
    Patch,
    Notice,
    News,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEntry {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: NotificationCategory,
    pub author: String,
    pub author_level: AdminLevel,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
}

impl NotificationEntry {
    pub fn pinned(&self) -> bool {
        self.is_pinned.unwrap_or(false)
    }
}

/// Fields supplied when publishing an announcement
#[derive(Debug, Clone)]
pub struct NoticeDraft {
    pub title: String,
    pub content: String,
    pub category: NotificationCategory,
    pub pinned: bool,
}
