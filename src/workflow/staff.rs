/// Staff account management
use super::permissions::{self, require};
use crate::error::{SentinelError, SentinelResult};
use crate::models::{Admin, AdminLevel, AdminStatus, NewAdmin, UserAuth};
use crate::store::RecordStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Shown as `lastActive` for accounts that never logged in
pub const NEVER_ACTIVE: &str = "Nunca";

/// Placeholder address until the first login
pub const UNKNOWN_IP: &str = "0.0.0.0";

/// Staff directory filter
#[derive(Debug, Clone, Default)]
pub struct AdminQuery {
    /// Case-insensitive match against name or email
    pub term: Option<String>,
    pub level: Option<AdminLevel>,
    pub status: Option<AdminStatus>,
}

impl AdminQuery {
    fn matches(&self, admin: &Admin) -> bool {
        if self.level.is_some_and(|level| admin.level != level) {
            return false;
        }
        if self.status.is_some_and(|status| admin.status != status) {
            return false;
        }

        match self.term.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                admin.name.to_lowercase().contains(&term)
                    || admin.email.to_lowercase().contains(&term)
            }
        }
    }
}

/// Staff manager
#[derive(Clone)]
pub struct StaffManager {
    store: Arc<RecordStore>,
}

impl StaffManager {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Register a staff account
    pub async fn add_admin(&self, actor: &UserAuth, new_admin: NewAdmin) -> SentinelResult<Admin> {
        require(
            permissions::can_manage_staff(actor.level),
            "add staff members",
            actor.level,
        )?;

        let name = new_admin.name.trim().to_string();
        let email = new_admin.email.trim().to_string();
        if name.is_empty() || email.is_empty() {
            return Err(SentinelError::Validation(
                "Staff name and email are required".to_string(),
            ));
        }

        let admin = self
            .store
            .insert_new::<Admin, _>("", |existing, id| {
                // Login matches on name, so names must stay unambiguous
                let lowered = name.to_lowercase();
                if existing.iter().any(|a| a.name.to_lowercase() == lowered) {
                    return Err(SentinelError::Validation(format!(
                        "A staff member named {} already exists",
                        name
                    )));
                }

                Ok(Admin {
                    id,
                    name,
                    email,
                    level: new_admin.level,
                    actions_count: 0,
                    last_active: NEVER_ACTIVE.to_string(),
                    avatar: None,
                    main_server: None,
                    status: AdminStatus::Offline,
                    efficiency: 0,
                    joined_date: Utc::now().format("%d/%m/%Y").to_string(),
                    last_login_ip: UNKNOWN_IP.to_string(),
                })
            })
            .await?;

        info!(
            "{} added staff member {} at {}",
            actor.name, admin.name, admin.level
        );
        Ok(admin)
    }

    /// Remove a staff account. Logs and requests naming it are kept.
    pub async fn remove_admin(&self, actor: &UserAuth, id: &str) -> SentinelResult<Admin> {
        require(
            permissions::can_manage_staff(actor.level),
            "remove staff members",
            actor.level,
        )?;

        let target = self
            .store
            .delete_checked::<Admin, _>(id, |target| {
                if target.name == actor.name {
                    return Err(SentinelError::Validation(
                        "Staff members cannot remove their own account".to_string(),
                    ));
                }
                require(
                    permissions::can_remove_admin(actor.level, target.level),
                    &format!("remove a {} account", target.level.display_name()),
                    actor.level,
                )
            })
            .await?
            .ok_or_else(|| SentinelError::NotFound(format!("Staff member {} not found", id)))?;

        info!("{} removed staff member {}", actor.name, target.name);
        Ok(target)
    }

    pub async fn search_admins(&self, query: &AdminQuery) -> SentinelResult<Vec<Admin>> {
        Ok(self
            .store
            .get_all::<Admin>()
            .await?
            .into_iter()
            .filter(|admin| query.matches(admin))
            .collect())
    }

    pub async fn find_by_name(&self, name: &str) -> SentinelResult<Option<Admin>> {
        let name = name.trim().to_lowercase();
        Ok(self
            .store
            .get_all::<Admin>()
            .await?
            .into_iter()
            .find(|admin| admin.name.to_lowercase() == name))
    }
}
