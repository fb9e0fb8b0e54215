/// Punishment records and punishment requests
use super::AdminLevel;
use crate::error::{SentinelError, SentinelResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix appended to the issuer of an edited log
pub const EDITED_MARKER: &str = "(Editado)";

/// Punishment kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PunishmentType {
    Ban,
    IpBan,
    Prison,
    Mute,
    Warn,
    OrgWarn,
}

impl PunishmentType {
    pub const ALL: [PunishmentType; 6] = [
        PunishmentType::Ban,
        PunishmentType::IpBan,
        PunishmentType::Prison,
        PunishmentType::Mute,
        PunishmentType::Warn,
        PunishmentType::OrgWarn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PunishmentType::Ban => "BAN",
            PunishmentType::IpBan => "IP_BAN",
            PunishmentType::Prison => "PRISON",
            PunishmentType::Mute => "MUTE",
            PunishmentType::Warn => "WARN",
            PunishmentType::OrgWarn => "ORG_WARN",
        }
    }

    /// Accepts the wire name in any case, with `-` or `_` separators
    pub fn from_str(s: &str) -> SentinelResult<Self> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| SentinelError::Validation(format!("Invalid punishment type: {}", s)))
    }

    /// Targets an organization rather than a player
    pub fn is_org(&self) -> bool {
        matches!(self, PunishmentType::OrgWarn)
    }

    pub fn is_ban(&self) -> bool {
        matches!(self, PunishmentType::Ban | PunishmentType::IpBan)
    }
}

impl fmt::Display for PunishmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review state of a punishment request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Approved => "APPROVED",
            RequestStatus::Rejected => "REJECTED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An executed punishment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub punishment_type: PunishmentType,
    /// Player name, or organization name for org warnings
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    pub admin: String,
    pub admin_level: AdminLevel,
    pub admin_ip: String,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warn_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_decision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_request: Option<bool>,
}

/// A proposed punishment awaiting review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub punishment_type: PunishmentType,
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    pub admin: String,
    pub admin_level: AdminLevel,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warn_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_decision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_request: Option<bool>,
    pub status: RequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_comment: Option<String>,
}

impl RequestEntry {
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

/// Caller-supplied punishment fields; identity, timestamps and the
/// issuer are filled in by the workflow
#[derive(Debug, Clone)]
pub struct PunishmentDraft {
    pub target: String,
    pub punishment_type: PunishmentType,
    pub reason: String,
    pub duration: Option<String>,
    pub server: Option<String>,
    pub ip: Option<String>,
    pub evidence_url: Option<String>,
    pub description: String,
    pub warn_level: Option<String>,
    pub staff_decision: Option<String>,
}

impl PunishmentDraft {
    pub fn new(punishment_type: PunishmentType, target: &str, reason: &str) -> Self {
        Self {
            target: target.to_string(),
            punishment_type,
            reason: reason.to_string(),
            duration: None,
            server: None,
            ip: None,
            evidence_url: None,
            description: String::new(),
            warn_level: None,
            staff_decision: None,
        }
    }

    pub fn with_duration(mut self, duration: &str) -> Self {
        self.duration = Some(duration.to_string());
        self
    }

    pub fn with_server(mut self, server: &str) -> Self {
        self.server = Some(server.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_evidence(mut self, url: &str) -> Self {
        self.evidence_url = Some(url.to_string());
        self
    }

    pub fn with_warn_level(mut self, warn_level: &str) -> Self {
        self.warn_level = Some(warn_level.to_string());
        self
    }
}
