/// Staff announcement board
use super::permissions::{self, require};
use crate::error::{SentinelError, SentinelResult};
use crate::models::{NoticeDraft, NotificationEntry, UserAuth};
use crate::store::RecordStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct NoticeBoard {
    store: Arc<RecordStore>,
}

impl NoticeBoard {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub async fn publish(
        &self,
        author: &UserAuth,
        draft: NoticeDraft,
    ) -> SentinelResult<NotificationEntry> {
        require(
            permissions::can_publish_notices(author.level),
            "publish announcements",
            author.level,
        )?;

        let title = draft.title.trim().to_string();
        let content = draft.content.trim().to_string();
        if title.is_empty() || content.is_empty() {
            return Err(SentinelError::Validation(
                "Announcement title and content are required".to_string(),
            ));
        }

        let notice = self
            .store
            .insert_new::<NotificationEntry, _>("", |_, id| {
                Ok(NotificationEntry {
                    id,
                    title,
                    content,
                    category: draft.category,
                    author: author.name.clone(),
                    author_level: author.level,
                    timestamp: Utc::now(),
                    is_pinned: Some(draft.pinned),
                })
            })
            .await?;

        info!("{} published announcement {}", author.name, notice.id);
        Ok(notice)
    }

    pub async fn delete(&self, actor: &UserAuth, id: &str) -> SentinelResult<bool> {
        require(
            permissions::can_publish_notices(actor.level),
            "delete announcements",
            actor.level,
        )?;
        self.store.delete::<NotificationEntry>(id).await
    }

    /// Pinned announcements first, then the rest; each group keeps its
    /// stored newest-first order
    pub async fn feed(&self) -> SentinelResult<Vec<NotificationEntry>> {
        let (mut pinned, rest): (Vec<_>, Vec<_>) = self
            .store
            .get_all::<NotificationEntry>()
            .await?
            .into_iter()
            .partition(NotificationEntry::pinned);
        pinned.extend(rest);
        Ok(pinned)
    }
}
