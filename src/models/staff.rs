/// Staff accounts, authority levels and the active session projection
use crate::error::SentinelError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal staff authority, 1 (lowest) to 5 (Master)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct AdminLevel(u8);

impl AdminLevel {
    pub const BASIC_MODERATOR: AdminLevel = AdminLevel(1);
    pub const ADVANCED_MODERATOR: AdminLevel = AdminLevel(2);
    pub const SUPERVISOR: AdminLevel = AdminLevel(3);
    pub const MANAGER: AdminLevel = AdminLevel(4);
    pub const MASTER: AdminLevel = AdminLevel(5);

    pub fn new(level: u8) -> Result<Self, SentinelError> {
        Self::try_from(level)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_master(self) -> bool {
        self == Self::MASTER
    }

    /// Label shown next to a staff member's name
    pub fn display_name(self) -> &'static str {
        match self.0 {
            1 => "Moderador Básico (LV1)",
            2 => "Moderador Avançado (LV2)",
            3 => "Supervisor (LV3)",
            4 => "Gerente (LV4)",
            _ => "Staff Geral (MASTER)",
        }
    }
}

impl TryFrom<u8> for AdminLevel {
    type Error = SentinelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=5).contains(&value) {
            Ok(AdminLevel(value))
        } else {
            Err(SentinelError::Validation(format!(
                "Invalid admin level: {} (expected 1-5)",
                value
            )))
        }
    }
}

impl From<AdminLevel> for u8 {
    fn from(level: AdminLevel) -> Self {
        level.0
    }
}

impl fmt::Display for AdminLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LV{}", self.0)
    }
}

/// Presence marker of a staff account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminStatus {
    Online,
    Offline,
    #[serde(rename = "Inativo")]
    Inactive,
}

/// Staff account stored in `admins`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: String,
    pub name: String,
    pub email: String,
    pub level: AdminLevel,
    pub actions_count: u32,
    pub last_active: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_server: Option<String>,
    pub status: AdminStatus,
    /// 0-100
    pub efficiency: u8,
    pub joined_date: String,
    pub last_login_ip: String,
}

/// Fields supplied when registering a staff account
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub name: String,
    pub email: String,
    pub level: AdminLevel,
}

/// Session presence; a session is never "Inativo"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Online,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastLogin {
    pub date: String,
    pub time: String,
    pub ip: String,
}

/// Derived activity counters shown on the profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencySummary {
    pub punishments_applied: u32,
    pub requests_created: u32,
    pub requests_approved: u32,
    pub requests_rejected: u32,
    pub avg_response_time: String,
    pub precision: u8,
}

impl EfficiencySummary {
    /// Summary derived from an account's action count
    pub fn from_admin(admin: &Admin, avg_response_time: &str) -> Self {
        let n = admin.actions_count;
        // Computed in u64; the result never exceeds n
        let percent = |p: u64| (u64::from(n) * p / 100) as u32;
        Self {
            punishments_applied: n,
            requests_created: n / 5,
            requests_approved: percent(18),
            requests_rejected: percent(2),
            avg_response_time: avg_response_time.to_string(),
            precision: admin.efficiency,
        }
    }
}

/// The current session's view of a staff account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAuth {
    pub name: String,
    pub email: String,
    pub level: AdminLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub status: SessionStatus,
    pub main_server: String,
    pub last_login: LastLogin,
    pub efficiency: EfficiencySummary,
}

impl UserAuth {
    /// Project an admin account into a session
    pub fn from_admin(admin: &Admin, last_login: LastLogin) -> Self {
        Self {
            name: admin.name.clone(),
            email: admin.email.clone(),
            level: admin.level,
            avatar: admin.avatar.clone(),
            status: SessionStatus::Online,
            main_server: admin
                .main_server
                .clone()
                .unwrap_or_else(|| "Principal".to_string()),
            last_login,
            efficiency: EfficiencySummary::from_admin(admin, "4min"),
        }
    }
}
