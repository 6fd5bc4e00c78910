use super::*;

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let store = SnapshotStore::new("sqlite::memory:").await.expect("db");
    store.health_check().await.expect("health check");
}

#[tokio::test]
async fn missing_snapshot_reads_as_none() {
    let store = SnapshotStore::new("sqlite::memory:").await.expect("db");
    let snapshot = store.read_snapshot("allWorksData").await.expect("read");
    assert!(snapshot.is_none());
}

#[tokio::test]
async fn write_replaces_previous_payload() {
    let store = SnapshotStore::new("sqlite::memory:").await.expect("db");
    store
        .write_snapshot("allWorksData", "[]")
        .await
        .expect("first write");
    store
        .write_snapshot("allWorksData", r#"[{"id":"w1"}]"#)
        .await
        .expect("second write");

    let snapshot = store
        .read_snapshot("allWorksData")
        .await
        .expect("read")
        .expect("present");
    assert_eq!(snapshot.key, "allWorksData");
    assert_eq!(snapshot.payload, r#"[{"id":"w1"}]"#);
    assert!(snapshot.updated_at <= Utc::now());
}

#[tokio::test]
async fn keys_are_independent() {
    let store = SnapshotStore::new("sqlite::memory:").await.expect("db");
    store.write_snapshot("a", "1").await.expect("write a");
    store.write_snapshot("b", "2").await.expect("write b");

    assert!(store.clear_snapshot("a").await.expect("clear a"));
    assert!(!store.clear_snapshot("a").await.expect("clear a twice"));
    assert!(store.read_snapshot("a").await.expect("read a").is_none());
    assert_eq!(
        store
            .read_snapshot("b")
            .await
            .expect("read b")
            .expect("b present")
            .payload,
        "2"
    );
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("nested").join("cache.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let store = SnapshotStore::new(&database_url).await.expect("db");
    store.write_snapshot("k", "v").await.expect("write");
    drop(store);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );

    let reopened = SnapshotStore::new(&database_url).await.expect("reopen");
    let snapshot = reopened.read_snapshot("k").await.expect("read");
    assert_eq!(snapshot.map(|s| s.payload).as_deref(), Some("v"));
}

#[test]
fn memory_urls_have_no_filesystem_path() {
    assert_eq!(sqlite_path("sqlite::memory:"), None);
    assert_eq!(
        sqlite_path("sqlite://./data/cache.db?mode=rwc"),
        Some(PathBuf::from("./data/cache.db"))
    );
    assert_eq!(sqlite_path("postgres://localhost/db"), None);
}
