/// Punishment submission and request review
use super::permissions::{self, require};
use super::stats::LogStats;
use crate::error::{SentinelError, SentinelResult};
use crate::models::{
    catalog, LogEntry, PunishmentDraft, PunishmentDuration, PunishmentType, RequestEntry,
    RequestStatus, UserAuth, EDITED_MARKER,
};
use crate::store::RecordStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of submitting a punishment
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// The submitter had the authority; the punishment is in effect
    Executed(LogEntry),
    /// The submitter lacked the authority; the punishment awaits review
    Requested(RequestEntry),
}

impl Submission {
    pub fn is_request(&self) -> bool {
        matches!(self, Submission::Requested(_))
    }

    pub fn id(&self) -> &str {
        match self {
            Submission::Executed(log) => &log.id,
            Submission::Requested(req) => &req.id,
        }
    }
}

/// Filter for the log listings
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    /// Empty means every type
    pub types: Vec<PunishmentType>,
    /// Case-insensitive match against target, reason or issuer
    pub search: Option<String>,
}

impl LogFilter {
    pub fn of_type(punishment_type: PunishmentType) -> Self {
        Self {
            types: vec![punishment_type],
            search: None,
        }
    }

    fn matches(&self, log: &LogEntry) -> bool {
        let type_matches = self.types.is_empty() || self.types.contains(&log.punishment_type);
        let search_matches = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                log.user.to_lowercase().contains(&term)
                    || log.reason.to_lowercase().contains(&term)
                    || log.admin.to_lowercase().contains(&term)
            }
        };
        type_matches && search_matches
    }
}

/// Draft after validation and normalization
struct CheckedDraft {
    target: String,
    punishment_type: PunishmentType,
    org_name: Option<String>,
    reason: String,
    duration: Option<String>,
    server: Option<String>,
    ip: Option<String>,
    evidence_url: Option<String>,
    description: String,
    warn_level: Option<String>,
    staff_decision: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_draft(draft: PunishmentDraft) -> SentinelResult<CheckedDraft> {
    let target = draft.target.trim().to_string();
    if target.is_empty() {
        return Err(SentinelError::Validation(
            "Punishment target is required".to_string(),
        ));
    }

    let reason = draft.reason.trim().to_string();
    if reason.is_empty() {
        return Err(SentinelError::Validation(
            "Punishment reason is required".to_string(),
        ));
    }

    let is_org = draft.punishment_type.is_org();

    // Org warnings carry a severity label instead of a duration
    let (duration, warn_level) = if is_org {
        let warn_level = non_empty(draft.warn_level)
            .unwrap_or_else(|| catalog::ORG_WARN_LEVELS[0].to_string());
        if !catalog::is_org_warn_level(&warn_level) {
            return Err(SentinelError::Validation(format!(
                "Invalid org warning level: {}",
                warn_level
            )));
        }
        (None, Some(warn_level))
    } else {
        let duration = non_empty(draft.duration)
            .map(|d| d.parse::<PunishmentDuration>().map(|d| d.to_string()))
            .transpose()?;
        (duration, None)
    };

    Ok(CheckedDraft {
        org_name: is_org.then(|| target.clone()),
        target,
        punishment_type: draft.punishment_type,
        reason,
        duration,
        server: non_empty(draft.server).or_else(|| Some(catalog::DEFAULT_SERVER.to_string())),
        ip: non_empty(draft.ip),
        evidence_url: non_empty(draft.evidence_url),
        description: draft.description.trim().to_string(),
        warn_level,
        staff_decision: non_empty(draft.staff_decision),
    })
}

/// Filter for one target's punishment history
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    /// Case-insensitive match against reason or issuer
    pub search: Option<String>,
    pub punishment_type: Option<PunishmentType>,
    /// Inclusive lower bound on the log timestamp
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the log timestamp
    pub to: Option<DateTime<Utc>>,
}

impl HistoryFilter {
    fn matches(&self, log: &LogEntry) -> bool {
        if self
            .punishment_type
            .is_some_and(|kind| log.punishment_type != kind)
        {
            return false;
        }
        if self.from.is_some_and(|from| log.timestamp < from) {
            return false;
        }
        if self.to.is_some_and(|to| log.timestamp > to) {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                log.reason.to_lowercase().contains(&term)
                    || log.admin.to_lowercase().contains(&term)
            }
        }
    }
}

/// Punishment workflow manager
#[derive(Clone)]
pub struct PunishmentManager {
    store: Arc<RecordStore>,
}

impl PunishmentManager {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Apply a punishment directly, or file it as a pending request when
    /// the submitter's level does not allow the action.
    ///
    /// Issuer name, level and IP come from the session.
    pub async fn submit(
        &self,
        session: &UserAuth,
        draft: PunishmentDraft,
    ) -> SentinelResult<Submission> {
        let draft = check_draft(draft)?;
        let now = Utc::now();

        if permissions::can_execute_action(session.level, draft.punishment_type) {
            let log = self
                .store
                .insert_new::<LogEntry, _>("", |_, id| {
                    Ok(LogEntry {
                        id,
                        punishment_type: draft.punishment_type,
                        user: draft.target,
                        org_name: draft.org_name,
                        ip: draft.ip,
                        reason: draft.reason,
                        duration: draft.duration,
                        server: draft.server,
                        admin: session.name.clone(),
                        admin_level: session.level,
                        admin_ip: session.last_login.ip.clone(),
                        timestamp: now,
                        description: draft.description,
                        evidence_url: draft.evidence_url,
                        warn_level: draft.warn_level,
                        staff_decision: draft.staff_decision,
                        is_request: Some(false),
                    })
                })
                .await?;

            info!(
                "{} applied {} to {} ({})",
                log.admin, log.punishment_type, log.user, log.id
            );
            return Ok(Submission::Executed(log));
        }

        let request = self
            .store
            .insert_new::<RequestEntry, _>("req-", |_, id| {
                Ok(RequestEntry {
                    id,
                    punishment_type: draft.punishment_type,
                    user: draft.target,
                    org_name: draft.org_name,
                    ip: draft.ip,
                    reason: draft.reason,
                    duration: draft.duration,
                    server: draft.server,
                    admin: session.name.clone(),
                    admin_level: session.level,
                    timestamp: now,
                    description: draft.description,
                    evidence_url: draft.evidence_url,
                    warn_level: draft.warn_level,
                    staff_decision: draft.staff_decision,
                    is_request: Some(true),
                    status: RequestStatus::Pending,
                    reviewed_by: None,
                    review_date: None,
                    review_comment: None,
                })
            })
            .await?;

        info!(
            "{} ({}) requested {} against {} ({})",
            request.admin, request.admin_level, request.punishment_type, request.user, request.id
        );
        Ok(Submission::Requested(request))
    }

    /// Resolve a pending request. Resolution is final; reviewing an
    /// approved or rejected request fails with `InvalidTransition`.
    ///
    /// The status check and the write happen under one store lock.
    /// Approval does not create a log entry.
    pub async fn review(
        &self,
        reviewer: &UserAuth,
        request_id: &str,
        decision: RequestStatus,
        comment: Option<String>,
    ) -> SentinelResult<RequestEntry> {
        require(
            permissions::can_review_requests(reviewer.level),
            "review punishment requests",
            reviewer.level,
        )?;

        if decision == RequestStatus::Pending {
            return Err(SentinelError::Validation(
                "A review must approve or reject the request".to_string(),
            ));
        }

        let request = self
            .store
            .update::<RequestEntry, _>(request_id, |request| {
                if request.status.is_terminal() {
                    warn!(
                        "{} tried to move request {} from {} to {}",
                        reviewer.name, request.id, request.status, decision
                    );
                    return Err(SentinelError::InvalidTransition {
                        id: request.id.clone(),
                        status: request.status,
                    });
                }

                request.status = decision;
                request.reviewed_by = Some(reviewer.name.clone());
                request.review_date = Some(Utc::now());
                request.review_comment = non_empty(comment);
                Ok(())
            })
            .await?
            .ok_or_else(|| SentinelError::NotFound(format!("Request {} not found", request_id)))?;

        info!("{} marked request {} as {}", reviewer.name, request.id, decision);
        Ok(request)
    }

    /// Rewrite a log's content, keeping its id, creation time and issuer
    /// level and IP. Each edit appends the edited marker to the issuer.
    pub async fn edit_log(
        &self,
        editor: &UserAuth,
        log_id: &str,
        draft: PunishmentDraft,
    ) -> SentinelResult<LogEntry> {
        require(
            permissions::can_manage_logs(editor.level),
            "edit punishment logs",
            editor.level,
        )?;
        let draft = check_draft(draft)?;

        let log = self
            .store
            .update::<LogEntry, _>(log_id, |log| {
                log.punishment_type = draft.punishment_type;
                log.user = draft.target;
                log.org_name = draft.org_name;
                log.ip = draft.ip;
                log.reason = draft.reason;
                log.duration = draft.duration;
                log.server = draft.server;
                log.admin = format!("{} {}", log.admin, EDITED_MARKER);
                log.description = draft.description;
                log.evidence_url = draft.evidence_url;
                log.warn_level = draft.warn_level;
                log.staff_decision = draft.staff_decision;
                Ok(())
            })
            .await?
            .ok_or_else(|| SentinelError::NotFound(format!("Log {} not found", log_id)))?;

        info!("{} edited log {}", editor.name, log.id);
        Ok(log)
    }

    /// Remove a log; an unknown id is not an error
    pub async fn delete_log(&self, actor: &UserAuth, log_id: &str) -> SentinelResult<bool> {
        require(
            permissions::can_manage_logs(actor.level),
            "delete punishment logs",
            actor.level,
        )?;
        self.store.delete::<LogEntry>(log_id).await
    }

    pub async fn logs(&self, filter: &LogFilter) -> SentinelResult<Vec<LogEntry>> {
        Ok(self
            .store
            .get_all::<LogEntry>()
            .await?
            .into_iter()
            .filter(|log| filter.matches(log))
            .collect())
    }

    /// Logs recorded against exactly `target`, narrowed by `filter`
    pub async fn user_history(
        &self,
        target: &str,
        filter: &HistoryFilter,
    ) -> SentinelResult<Vec<LogEntry>> {
        Ok(self
            .store
            .get_all::<LogEntry>()
            .await?
            .into_iter()
            .filter(|log| log.user == target && filter.matches(log))
            .collect())
    }

    /// Dashboard counters over every log
    pub async fn stats(&self) -> SentinelResult<LogStats> {
        let logs = self.store.get_all::<LogEntry>().await?;
        Ok(LogStats::from_logs(&logs))
    }

    pub async fn pending_requests(&self) -> SentinelResult<Vec<RequestEntry>> {
        self.requests_where(|r| r.is_pending()).await
    }

    /// Resolved requests, newest first
    pub async fn request_history(&self) -> SentinelResult<Vec<RequestEntry>> {
        self.requests_where(|r| !r.is_pending()).await
    }

    pub async fn my_requests(&self, name: &str) -> SentinelResult<Vec<RequestEntry>> {
        self.requests_where(|r| r.admin == name).await
    }

    async fn requests_where(
        &self,
        predicate: impl Fn(&RequestEntry) -> bool,
    ) -> SentinelResult<Vec<RequestEntry>> {
        Ok(self
            .store
            .get_all::<RequestEntry>()
            .await?
            .into_iter()
            .filter(|r| predicate(r))
            .collect())
    }
}
