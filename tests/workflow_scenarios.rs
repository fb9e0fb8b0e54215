/// End-to-end moderation scenarios over an in-memory panel

use sentinel_panel::{
    config::SentinelConfig,
    context::AppContext,
    models::{
        Admin, AdminLevel, LogEntry, PunishmentDraft, PunishmentType, RequestEntry, RequestStatus,
        UserAuth,
    },
    workflow::{can_execute_action, ClientInfo, HistoryFilter, Submission},
    SentinelError,
};

async fn panel() -> AppContext {
    AppContext::new(SentinelConfig::in_memory()).await.unwrap()
}

fn session_at(ctx_user: &UserAuth, level: u8) -> UserAuth {
    let mut user = ctx_user.clone();
    user.name = format!("Moderador {}", level);
    user.level = AdminLevel::new(level).unwrap();
    user
}

#[tokio::test]
async fn test_level_one_ban_becomes_request() {
    let ctx = panel().await;
    let base = ctx.sessions.current_user().await.unwrap();
    let logs_before = ctx.store.get_all::<LogEntry>().await.unwrap().len();

    let submission = ctx
        .punishments
        .submit(
            &session_at(&base, 1),
            PunishmentDraft::new(PunishmentType::Ban, "Griefer_01", "Anti-RP").with_duration("7 Dias"),
        )
        .await
        .unwrap();

    let Submission::Requested(request) = submission else {
        panic!("level 1 cannot ban directly");
    };
    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.is_request, Some(true));
    assert!(request.id.starts_with("req-"));

    assert_eq!(ctx.store.get_all::<LogEntry>().await.unwrap().len(), logs_before);

    let pending = ctx.punishments.pending_requests().await.unwrap();
    assert_eq!(pending[0].id, request.id);
    let mine = ctx.punishments.my_requests("Moderador 1").await.unwrap();
    assert_eq!(mine.len(), 1);
}

#[tokio::test]
async fn test_master_ip_ban_is_executed() {
    let ctx = panel().await;
    let master = ctx.sessions.current_user().await.unwrap();
    let requests_before = ctx.store.get_all::<RequestEntry>().await.unwrap().len();

    let submission = ctx
        .punishments
        .submit(
            &master,
            PunishmentDraft::new(PunishmentType::IpBan, "Cheater", "Uso de hack (Fly/Speed/Aimbot)"),
        )
        .await
        .unwrap();

    assert!(!submission.is_request());
    let logs = ctx.store.get_all::<LogEntry>().await.unwrap();
    assert_eq!(logs[0].id, submission.id());
    assert_eq!(logs[0].is_request, Some(false));
    assert_eq!(
        ctx.store.get_all::<RequestEntry>().await.unwrap().len(),
        requests_before
    );
}

#[test]
fn test_ip_ban_gap_below_master() {
    for level in 1..=4 {
        let level = AdminLevel::new(level).unwrap();
        assert!(!can_execute_action(level, PunishmentType::IpBan));
    }
    for action in PunishmentType::ALL {
        assert!(can_execute_action(AdminLevel::MASTER, action));
    }
}

#[tokio::test]
async fn test_resolved_request_never_transitions_again() {
    let ctx = panel().await;
    let base = ctx.sessions.current_user().await.unwrap();
    let reviewer = session_at(&base, 4);

    let approved = ctx
        .punishments
        .review(&reviewer, "req-1", RequestStatus::Approved, None)
        .await
        .unwrap();
    assert_eq!(approved.status, RequestStatus::Approved);

    let err = ctx
        .punishments
        .review(&reviewer, "req-1", RequestStatus::Rejected, Some("mudei de ideia".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SentinelError::InvalidTransition { status: RequestStatus::Approved, .. }
    ));

    let stored = ctx.store.get::<RequestEntry>("req-1").await.unwrap().unwrap();
    assert_eq!(stored, approved);

    // Approval does not materialize a log
    let logs = ctx
        .punishments
        .user_history("Toxic_Gamer_22", &HistoryFilter::default())
        .await
        .unwrap();
    assert!(logs.is_empty());
}

#[tokio::test]
async fn test_manager_cannot_delete_manager() {
    let ctx = panel().await;
    let base = ctx.sessions.current_user().await.unwrap();

    let err = ctx
        .staff
        .remove_admin(&session_at(&base, 4), "2")
        .await
        .unwrap_err();
    assert!(err.is_denial());
    assert_eq!(ctx.store.get_all::<Admin>().await.unwrap().len(), 2);

    ctx.staff.remove_admin(&session_at(&base, 5), "2").await.unwrap();
    let admins = ctx.store.get_all::<Admin>().await.unwrap();
    assert!(admins.iter().all(|a| a.id != "2"));
}

#[tokio::test]
async fn test_removed_admin_keeps_history() {
    let ctx = panel().await;
    let master = ctx.sessions.current_user().await.unwrap();

    let carlos = ctx
        .sessions
        .login(
            "gerente carlos",
            &ClientInfo {
                ip: "177.45.22.10".to_string(),
                user_agent: "test".to_string(),
            },
        )
        .await
        .unwrap();
    ctx.punishments
        .submit(&carlos, PunishmentDraft::new(PunishmentType::Warn, "Bob", "Ofensa"))
        .await
        .unwrap();

    ctx.staff.remove_admin(&master, "2").await.unwrap();

    let logs = ctx
        .punishments
        .user_history("Bob", &HistoryFilter::default())
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].admin, "Gerente Carlos");
    assert_eq!(logs[0].admin_ip, "177.45.22.10");
}

#[tokio::test]
async fn test_dashboard_stats_follow_logs() {
    let ctx = panel().await;
    let master = ctx.sessions.current_user().await.unwrap();

    let before = ctx.punishments.stats().await.unwrap();
    assert_eq!(before.total, 1);
    assert_eq!(before.bans, 1);

    ctx.punishments
        .submit(&master, PunishmentDraft::new(PunishmentType::Mute, "Bob", "Flood"))
        .await
        .unwrap();
    ctx.punishments.delete_log(&master, "1").await.unwrap();

    let after = ctx.punishments.stats().await.unwrap();
    assert_eq!(after.total, 1);
    assert_eq!(after.bans, 0);
    assert_eq!(after.mutes, 1);
}
