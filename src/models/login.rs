/// Login audit trail
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoginStatus {
    Success,
    Failed,
}

/// Immutable login history entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRecord {
    pub id: String,
    pub username: String,
    pub timestamp: DateTime<Utc>,
    pub ip: String,
    pub user_agent: String,
    pub status: LoginStatus,
    pub details: String,
}

/// Login attempt as reported by the caller; id and timestamp are
/// assigned when the attempt is recorded
#[derive(Debug, Clone)]
pub struct LoginAttempt {
    pub username: String,
    pub ip: String,
    pub user_agent: String,
    pub status: LoginStatus,
    pub details: String,
}
