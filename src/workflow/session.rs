/// Login and the active session
use crate::error::{SentinelError, SentinelResult};
use crate::models::{LastLogin, LoginAttempt, LoginRecord, LoginStatus, UserAuth};
use crate::store::RecordStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

pub const LOGIN_SUCCESS_DETAILS: &str = "Autenticação via Painel Sentinel";
pub const LOGIN_UNKNOWN_USER_DETAILS: &str = "Tentativa de login com usuário inexistente";

/// Where a login attempt came from
#[derive(Debug, Clone)]
pub struct ClientInfo {
    pub ip: String,
    pub user_agent: String,
}

#[derive(Clone)]
pub struct SessionManager {
    store: Arc<RecordStore>,
}

impl SessionManager {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Authenticate by staff name (case-insensitive) and open a session.
    ///
    /// Every attempt lands in the login history, failed ones included.
    pub async fn login(&self, username: &str, client: &ClientInfo) -> SentinelResult<UserAuth> {
        let admin = super::StaffManager::new(self.store.clone())
            .find_by_name(username)
            .await?;

        let Some(admin) = admin else {
            let failed = attempt(username, client, LoginStatus::Failed, LOGIN_UNKNOWN_USER_DETAILS);
            self.store.record_login(failed).await?;
            warn!("Rejected login for unknown user {} from {}", username, client.ip);
            return Err(SentinelError::Authentication(format!(
                "Unknown staff member: {}",
                username
            )));
        };

        let succeeded = attempt(username, client, LoginStatus::Success, LOGIN_SUCCESS_DETAILS);
        self.store.record_login(succeeded).await?;

        let now = Utc::now();
        let session = UserAuth::from_admin(
            &admin,
            LastLogin {
                date: now.format("%d/%m/%Y").to_string(),
                time: now.format("%H:%M:%S").to_string(),
                ip: client.ip.clone(),
            },
        );
        self.store.set_current_user(&session).await?;

        info!("{} logged in at {}", session.name, session.level);
        Ok(session)
    }

    pub async fn current_user(&self) -> SentinelResult<UserAuth> {
        self.store.get_current_user().await
    }

    /// Most recent login attempts, newest first
    pub async fn login_history(&self, limit: Option<usize>) -> SentinelResult<Vec<LoginRecord>> {
        let history = self.store.get_all::<LoginRecord>().await?;
        Ok(match limit {
            Some(limit) => history.into_iter().take(limit).collect(),
            None => history,
        })
    }
}

fn attempt(username: &str, client: &ClientInfo, status: LoginStatus, details: &str) -> LoginAttempt {
    LoginAttempt {
        username: username.to_string(),
        ip: client.ip.clone(),
        user_agent: client.user_agent.clone(),
        status,
        details: details.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdminLevel, SessionStatus};

    fn client() -> ClientInfo {
        ClientInfo {
            ip: "189.124.55.201".to_string(),
            user_agent: "sentinel-test".to_string(),
        }
    }

    async fn sessions() -> SessionManager {
        let store = Arc::new(RecordStore::in_memory());
        store.initialize().await.unwrap();
        SessionManager::new(store)
    }

    #[tokio::test]
    async fn test_login_builds_session() {
        let sessions = sessions().await;
        let user = sessions.login("GERENTE carlos", &client()).await.unwrap();

        assert_eq!(user.name, "Gerente Carlos");
        assert_eq!(user.level, AdminLevel::MANAGER);
        assert_eq!(user.status, SessionStatus::Online);
        assert_eq!(user.last_login.ip, "189.124.55.201");
        assert_eq!(user.efficiency.punishments_applied, 850);
        assert_eq!(user.efficiency.requests_created, 170);
        assert_eq!(user.efficiency.requests_approved, 153);
        assert_eq!(user.efficiency.requests_rejected, 17);
        assert_eq!(user.efficiency.precision, 91);
        assert_eq!(user.efficiency.avg_response_time, "4min");

        assert_eq!(sessions.current_user().await.unwrap(), user);

        let history = sessions.login_history(None).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, LoginStatus::Success);
        assert_eq!(history[0].username, "GERENTE carlos");
        assert_eq!(history[0].details, LOGIN_SUCCESS_DETAILS);
    }

    #[tokio::test]
    async fn test_unknown_user_is_recorded() {
        let sessions = sessions().await;
        let err = sessions.login("ghost", &client()).await.unwrap_err();
        assert!(matches!(err, SentinelError::Authentication(_)));

        let history = sessions.login_history(Some(5)).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, LoginStatus::Failed);
        assert_eq!(history[0].details, LOGIN_UNKNOWN_USER_DETAILS);
    }

    #[tokio::test]
    async fn test_history_limit_keeps_newest() {
        let sessions = sessions().await;
        for _ in 0..3 {
            let _ = sessions.login("ghost", &client()).await;
        }
        sessions.login("admin master", &client()).await.unwrap();

        let recent = sessions.login_history(Some(2)).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].status, LoginStatus::Success);
    }
}
