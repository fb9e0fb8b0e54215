/// Initial content written to collections that were never persisted
use crate::models::{
    catalog, Admin, AdminLevel, AdminStatus, EfficiencySummary, LastLogin, LogEntry,
    LoginRecord, NotificationCategory, NotificationEntry, PunishmentType, RequestEntry,
    RequestStatus, SessionStatus, UserAuth, PERMANENT,
};
use chrono::{DateTime, Utc};

pub const MASTER_NAME: &str = "Admin Master";

pub fn logs(now: DateTime<Utc>) -> Vec<LogEntry> {
    vec![LogEntry {
        id: "1".to_string(),
        punishment_type: PunishmentType::Ban,
        user: "PlayerOne".to_string(),
        org_name: None,
        ip: Some("192.168.1.10".to_string()),
        reason: "Uso de hack (Fly/Speed/Aimbot)".to_string(),
        duration: Some(PERMANENT.to_string()),
        server: Some(catalog::DEFAULT_SERVER.to_string()),
        admin: MASTER_NAME.to_string(),
        admin_level: AdminLevel::MASTER,
        admin_ip: "10.0.0.1".to_string(),
        timestamp: now,
        description: "O jogador foi pego voando na arena principal.".to_string(),
        evidence_url: None,
        warn_level: None,
        staff_decision: None,
        is_request: None,
    }]
}

pub fn admins() -> Vec<Admin> {
    vec![
        Admin {
            id: "1".to_string(),
            name: MASTER_NAME.to_string(),
            email: "master@sentinel.io".to_string(),
            level: AdminLevel::MASTER,
            actions_count: 1542,
            last_active: "Hoje às 18:42".to_string(),
            avatar: None,
            main_server: Some("Principal".to_string()),
            status: AdminStatus::Online,
            efficiency: 98,
            joined_date: "01/01/2024".to_string(),
            last_login_ip: "189.124.55.201".to_string(),
        },
        Admin {
            id: "2".to_string(),
            name: "Gerente Carlos".to_string(),
            email: "carlos@sentinel.io".to_string(),
            level: AdminLevel::MANAGER,
            actions_count: 850,
            last_active: "Hoje às 16:30".to_string(),
            avatar: None,
            main_server: Some("Principal".to_string()),
            status: AdminStatus::Online,
            efficiency: 91,
            joined_date: "15/03/2024".to_string(),
            last_login_ip: "177.45.22.10".to_string(),
        },
    ]
}

pub fn requests(now: DateTime<Utc>) -> Vec<RequestEntry> {
    vec![RequestEntry {
        id: "req-1".to_string(),
        punishment_type: PunishmentType::Ban,
        user: "Toxic_Gamer_22".to_string(),
        org_name: None,
        ip: None,
        reason: "Uso de hack (Fly/Speed/Aimbot)".to_string(),
        duration: Some(PERMANENT.to_string()),
        server: Some(catalog::DEFAULT_SERVER.to_string()),
        admin: MASTER_NAME.to_string(),
        admin_level: AdminLevel::MASTER,
        timestamp: now,
        description: "Solicito banimento após flagrante de speed hack na corrida ilegal."
            .to_string(),
        evidence_url: Some("https://drive.google.com/file/d/demo/view".to_string()),
        warn_level: None,
        staff_decision: None,
        is_request: None,
        status: RequestStatus::Pending,
        reviewed_by: None,
        review_date: None,
        review_comment: None,
    }]
}

pub fn notifications(now: DateTime<Utc>) -> Vec<NotificationEntry> {
    vec![NotificationEntry {
        id: "n1".to_string(),
        title: "Manutenção do Banco de Dados".to_string(),
        content: "O sistema passará por manutenção preventiva no próximo domingo às 04:00 AM."
            .to_string(),
        category: NotificationCategory::Maintenance,
        author: "Staff Master".to_string(),
        author_level: AdminLevel::MASTER,
        timestamp: now,
        is_pinned: Some(true),
    }]
}

pub fn login_history() -> Vec<LoginRecord> {
    Vec::new()
}

/// Session used before anyone has logged in
pub fn default_user() -> UserAuth {
    UserAuth {
        name: MASTER_NAME.to_string(),
        email: "master@sentinel.io".to_string(),
        level: AdminLevel::MASTER,
        avatar: None,
        status: SessionStatus::Online,
        main_server: catalog::DEFAULT_SERVER.to_string(),
        last_login: LastLogin {
            date: "06/01/2026".to_string(),
            time: "18:42".to_string(),
            ip: "189.124.55.201".to_string(),
        },
        efficiency: EfficiencySummary {
            punishments_applied: 142,
            requests_created: 45,
            requests_approved: 38,
            requests_rejected: 7,
            avg_response_time: "3min".to_string(),
            precision: 84,
        },
    }
}
