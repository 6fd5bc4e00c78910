use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::debug;

/// Client-local key/value store holding serialized snapshots.
///
/// Each key maps to one row, so a reader always sees a whole payload even when
/// another writer replaces it concurrently.
#[derive(Clone)]
pub struct SnapshotStore {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone)]
pub struct StoredSnapshot {
    pub key: String,
    pub payload: String,
    pub updated_at: DateTime<Utc>,
}

impl SnapshotStore {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // every in-memory connection is its own database
        let max_connections = if is_memory_url(database_url) { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect_options)
            .await?;

        let store = Self { pool };
        store.ensure_snapshot_table().await?;
        Ok(store)
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    async fn ensure_snapshot_table(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS snapshots (
                key        TEXT PRIMARY KEY NOT NULL,
                payload    TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("failed to ensure snapshots table exists")?;
        Ok(())
    }

    pub async fn read_snapshot(&self, key: &str) -> Result<Option<StoredSnapshot>> {
        let row = sqlx::query("SELECT key, payload, updated_at FROM snapshots WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to read snapshot '{key}'"))?;

        Ok(row.map(|row| StoredSnapshot {
            key: row.get::<String, _>("key"),
            payload: row.get::<String, _>("payload"),
            updated_at: row.get::<DateTime<Utc>, _>("updated_at"),
        }))
    }

    pub async fn write_snapshot(&self, key: &str, payload: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO snapshots (key, payload, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(payload)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to write snapshot '{key}'"))?;
        debug!(key, bytes = payload.len(), "snapshot written");
        Ok(())
    }

    /// Returns whether a snapshot was present.
    pub async fn clear_snapshot(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM snapshots WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to clear snapshot '{key}'"))?;
        Ok(result.rows_affected() > 0)
    }
}

fn is_memory_url(database_url: &str) -> bool {
    database_url.starts_with("sqlite::memory:") || database_url.contains("mode=memory")
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if is_memory_url(database_url) || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
