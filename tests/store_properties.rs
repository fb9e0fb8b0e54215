/// Record store properties checked against both backends

use chrono::DateTime;
use sentinel_panel::{
    models::{Admin, LogEntry, LoginAttempt, LoginStatus, RequestEntry},
    store::{seed, Collection, DiskBackend, FullBackup, RecordStore},
};
use std::sync::Arc;
use tempfile::tempdir;

fn login(name: &str) -> LoginAttempt {
    LoginAttempt {
        username: name.to_string(),
        ip: "10.0.0.2".to_string(),
        user_agent: "test".to_string(),
        status: LoginStatus::Success,
        details: "ok".to_string(),
    }
}

fn log_with_id(id: &str) -> LogEntry {
    let mut log = seed::logs(chrono::Utc::now()).remove(0);
    log.id = id.to_string();
    log
}

#[tokio::test]
async fn test_full_backup_shape() {
    let store = RecordStore::in_memory();
    store.save(log_with_id("a")).await.unwrap();
    store.save(log_with_id("b")).await.unwrap();
    store.save(seed::admins().remove(0)).await.unwrap();
    for name in ["ana", "bia", "caio"] {
        store.record_login(login(name)).await.unwrap();
    }

    let file = store.export_full_backup().await.unwrap();
    assert_eq!(file.file_name, "sentinel_full_backup.json");

    let value: serde_json::Value = serde_json::from_str(&file.contents).unwrap();
    assert_eq!(value["logs"].as_array().unwrap().len(), 2);
    assert_eq!(value["admins"].as_array().unwrap().len(), 1);
    assert_eq!(value["requests"].as_array().unwrap().len(), 0);
    assert_eq!(value["logins"].as_array().unwrap().len(), 3);
    let exported_at = value["exportedAt"].as_str().unwrap();
    assert!(DateTime::parse_from_rfc3339(exported_at).is_ok());

    let backup: FullBackup = serde_json::from_str(&file.contents).unwrap();
    assert_eq!(backup.logins[0].username, "caio");
}

#[tokio::test]
async fn test_export_import_round_trip() {
    let source = RecordStore::in_memory();
    source.initialize().await.unwrap();
    source.save(log_with_id("extra")).await.unwrap();
    let before = source.get_all::<LogEntry>().await.unwrap();

    let file = source.export_collection(Collection::Logs).await.unwrap();
    assert_eq!(file.file_name, "logs.json");

    let target = RecordStore::in_memory();
    let count = target
        .import_collection(Collection::Logs, &file.contents)
        .await
        .unwrap();
    assert_eq!(count, 2);
    assert_eq!(target.get_all::<LogEntry>().await.unwrap(), before);
}

#[tokio::test]
async fn test_upsert_and_absent_delete_on_disk() {
    let dir = tempdir().unwrap();
    let store = RecordStore::new(Arc::new(DiskBackend::new(dir.path().to_path_buf())));
    store.initialize().await.unwrap();

    let mut admin: Admin = store.get("2").await.unwrap().unwrap();
    admin.actions_count += 1;
    store.save(admin.clone()).await.unwrap();
    store.save(admin.clone()).await.unwrap();

    let admins = store.get_all::<Admin>().await.unwrap();
    assert_eq!(admins.iter().filter(|a| a.id == "2").count(), 1);
    assert_eq!(admins[1], admin);

    let before = store.raw_content(Collection::Requests).await.unwrap();
    assert!(!store.delete::<RequestEntry>("missing").await.unwrap());
    assert_eq!(store.raw_content(Collection::Requests).await.unwrap(), before);
}

#[tokio::test]
async fn test_reinitialize_is_not_destructive() {
    let dir = tempdir().unwrap();
    let backend = Arc::new(DiskBackend::new(dir.path().to_path_buf()));

    let store = RecordStore::new(backend.clone());
    assert_eq!(store.initialize().await.unwrap().len(), Collection::ALL.len());
    store.delete::<LogEntry>("1").await.unwrap();

    let reopened = RecordStore::new(backend);
    assert!(reopened.initialize().await.unwrap().is_empty());
    assert!(reopened.get_all::<LogEntry>().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_collection_reads_empty_but_shows_raw() {
    let dir = tempdir().unwrap();
    let store = RecordStore::new(Arc::new(DiskBackend::new(dir.path().to_path_buf())));
    store.initialize().await.unwrap();
    tokio::fs::write(dir.path().join("sentinel_db_logs.json"), "[{broken")
        .await
        .unwrap();

    assert!(store.get_all::<LogEntry>().await.unwrap().is_empty());
    assert_eq!(store.raw_content(Collection::Logs).await.unwrap(), "[{broken");
    assert!(store.raw_view(Collection::Logs).await.unwrap().is_malformed());
    assert!(store.save(log_with_id("x")).await.is_err());
}
