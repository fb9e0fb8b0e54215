/// Level-gated permission rules
use crate::error::{SentinelError, SentinelResult};
use crate::models::{AdminLevel, PunishmentType};

/// Lowest level that may review requests, manage staff, edit or delete
/// logs and publish announcements
pub const MANAGEMENT_LEVEL: AdminLevel = AdminLevel::MANAGER;

/// Whether a staff member may apply a punishment without a review.
///
/// IP bans fall through to the denial arm for every level below Master.
pub fn can_execute_action(level: AdminLevel, action: PunishmentType) -> bool {
    if level.is_master() {
        return true;
    }

    match action {
        PunishmentType::Mute | PunishmentType::Prison => level >= AdminLevel::BASIC_MODERATOR,
        PunishmentType::Ban | PunishmentType::Warn | PunishmentType::OrgWarn => {
            level >= AdminLevel::ADVANCED_MODERATOR
        }
        PunishmentType::IpBan => false,
    }
}

pub fn can_review_requests(level: AdminLevel) -> bool {
    level >= MANAGEMENT_LEVEL
}

pub fn can_manage_logs(level: AdminLevel) -> bool {
    level >= MANAGEMENT_LEVEL
}

pub fn can_manage_staff(level: AdminLevel) -> bool {
    level >= MANAGEMENT_LEVEL
}

pub fn can_publish_notices(level: AdminLevel) -> bool {
    level >= MANAGEMENT_LEVEL
}

/// Whether `actor` may remove a staff account of level `target`.
///
/// Managers (level 4) cannot remove peers or superiors; Master can
/// remove anyone.
pub fn can_remove_admin(actor: AdminLevel, target: AdminLevel) -> bool {
    if !can_manage_staff(actor) {
        return false;
    }
    !(actor == AdminLevel::MANAGER && target >= AdminLevel::MANAGER)
}

/// Turn a failed permission check into an authorization error
pub(crate) fn require(allowed: bool, what: &str, level: AdminLevel) -> SentinelResult<()> {
    if allowed {
        Ok(())
    } else {
        tracing::warn!("Denied {} for {}", what, level);
        Err(SentinelError::Authorization(format!(
            "{} cannot {}",
            level.display_name(),
            what
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(n: u8) -> AdminLevel {
        AdminLevel::new(n).unwrap()
    }

    #[test]
    fn test_master_executes_everything() {
        for action in PunishmentType::ALL {
            assert!(can_execute_action(AdminLevel::MASTER, action));
        }
    }

    #[test]
    fn test_ip_ban_denied_below_master() {
        for n in 1..=4 {
            assert!(!can_execute_action(level(n), PunishmentType::IpBan));
        }
    }

    #[test]
    fn test_action_thresholds() {
        assert!(can_execute_action(level(1), PunishmentType::Mute));
        assert!(can_execute_action(level(1), PunishmentType::Prison));
        assert!(!can_execute_action(level(1), PunishmentType::Ban));
        assert!(!can_execute_action(level(1), PunishmentType::Warn));
        assert!(!can_execute_action(level(1), PunishmentType::OrgWarn));

        assert!(can_execute_action(level(2), PunishmentType::Ban));
        assert!(can_execute_action(level(3), PunishmentType::Warn));
        assert!(can_execute_action(level(4), PunishmentType::OrgWarn));
    }

    #[test]
    fn test_admin_removal_matrix() {
        assert!(can_remove_admin(level(5), level(5)));
        assert!(can_remove_admin(level(5), level(4)));
        assert!(can_remove_admin(level(4), level(3)));
        assert!(!can_remove_admin(level(4), level(4)));
        assert!(!can_remove_admin(level(4), level(5)));
        assert!(!can_remove_admin(level(3), level(1)));
    }

    #[test]
    fn test_management_gates() {
        assert!(!can_review_requests(level(3)));
        assert!(can_review_requests(level(4)));
        assert!(can_manage_logs(level(5)));
        assert!(!can_publish_notices(level(2)));
    }

    #[test]
    fn test_require_message() {
        let err = require(false, "review requests", level(2)).unwrap_err();
        assert!(err.is_denial());
        assert!(err.to_string().contains("Insufficient permission"));
        assert!(require(true, "review requests", level(2)).is_ok());
    }
}
