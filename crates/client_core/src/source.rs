use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::Work, error::ErrorCode};
use storage::SnapshotStore;
use tracing::{debug, warn};

use crate::config::{Settings, SourceKind};

/// Well-known key of the "all works" snapshot in local storage.
pub const WORKS_SNAPSHOT_KEY: &str = "allWorksData";

/// Supplies every known work. Failures degrade to an empty list; callers treat
/// "no data" as a valid state.
#[async_trait]
pub trait WorkSource: Send + Sync {
    async fn load_all_works(&self) -> Vec<Work>;
}

/// Source used when neither a network nor a persistent context exists.
pub struct UnavailableWorkSource;

#[async_trait]
impl WorkSource for UnavailableWorkSource {
    async fn load_all_works(&self) -> Vec<Work> {
        debug!("no work source context available; returning no works");
        Vec::new()
    }
}

pub struct RemoteWorkSource {
    http: Client,
    api_url: Option<String>,
}

impl RemoteWorkSource {
    pub fn new(api_url: Option<String>) -> Self {
        Self::with_client(Client::new(), api_url)
    }

    pub fn with_client(http: Client, api_url: Option<String>) -> Self {
        Self { http, api_url }
    }

    async fn fetch(&self, api_url: &str) -> Result<Vec<Work>> {
        let url = endpoint(api_url, "works");
        let body = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?
            .error_for_status()?
            .text()
            .await?;
        decode_work_list(&body).with_context(|| format!("GET {url} returned a non-array body"))
    }
}

#[async_trait]
impl WorkSource for RemoteWorkSource {
    async fn load_all_works(&self) -> Vec<Work> {
        let Some(api_url) = self.api_url.as_deref() else {
            debug!("works api url not configured; returning no works");
            return Vec::new();
        };

        match self.fetch(api_url).await {
            Ok(works) => {
                debug!(count = works.len(), "fetched works from api");
                works
            }
            Err(error) => {
                warn!(
                    code = ?ErrorCode::DataUnavailable,
                    error = %format!("{error:#}"),
                    "failed to fetch works; continuing without data"
                );
                Vec::new()
            }
        }
    }
}

pub struct CachedWorkSource {
    store: Option<SnapshotStore>,
    key: String,
}

impl CachedWorkSource {
    pub fn new(store: Option<SnapshotStore>) -> Self {
        Self::with_key(store, WORKS_SNAPSHOT_KEY)
    }

    pub fn with_key(store: Option<SnapshotStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }
}

#[async_trait]
impl WorkSource for CachedWorkSource {
    async fn load_all_works(&self) -> Vec<Work> {
        let Some(store) = &self.store else {
            debug!("no snapshot store available; returning no works");
            return Vec::new();
        };

        let snapshot = match store.read_snapshot(&self.key).await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                debug!(key = %self.key, "works snapshot absent");
                return Vec::new();
            }
            Err(error) => {
                warn!(
                    code = ?ErrorCode::DataUnavailable,
                    key = %self.key,
                    error = %format!("{error:#}"),
                    "failed to read works snapshot"
                );
                return Vec::new();
            }
        };

        match decode_work_list(&snapshot.payload) {
            Ok(works) => works,
            Err(error) => {
                warn!(
                    code = ?ErrorCode::MalformedInput,
                    key = %self.key,
                    %error,
                    "failed to parse works snapshot"
                );
                Vec::new()
            }
        }
    }
}

/// Decodes a JSON array of raw work records. Entries that do not decode are
/// skipped; anything other than an array is an error.
pub fn decode_work_list(raw: &str) -> Result<Vec<Work>, serde_json::Error> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    let works = entries
        .into_iter()
        .enumerate()
        .filter_map(
            |(index, entry)| match serde_json::from_value::<Work>(entry) {
                Ok(work) => Some(work),
                Err(error) => {
                    warn!(
                        code = ?ErrorCode::MalformedInput,
                        index,
                        %error,
                        "skipping malformed work record"
                    );
                    None
                }
            },
        )
        .collect();
    Ok(works)
}

/// Opens and pings the snapshot store. `None` means there is no persistent
/// context and cached reads degrade to no data.
pub async fn open_snapshot_store(database_url: &str) -> Option<SnapshotStore> {
    let opened = match SnapshotStore::new(database_url).await {
        Ok(store) => store.health_check().await.map(|()| store),
        Err(error) => Err(error),
    };
    match opened {
        Ok(store) => Some(store),
        Err(error) => {
            warn!(
                code = ?ErrorCode::DataUnavailable,
                database_url,
                error = %format!("{error:#}"),
                "snapshot storage unavailable"
            );
            None
        }
    }
}

/// Replaces the "all works" snapshot.
pub async fn publish_snapshot(store: &SnapshotStore, works: &[Work]) -> Result<()> {
    let payload = serde_json::to_string(works).context("failed to encode works snapshot")?;
    store.write_snapshot(WORKS_SNAPSHOT_KEY, &payload).await
}

pub fn build_work_source(settings: &Settings, store: Option<SnapshotStore>) -> Arc<dyn WorkSource> {
    match settings.work_source {
        SourceKind::Remote => Arc::new(RemoteWorkSource::new(settings.api_url.clone())),
        SourceKind::Cache => Arc::new(CachedWorkSource::new(store)),
    }
}

pub(crate) fn endpoint(api_url: &str, path: &str) -> String {
    format!("{}/{}", api_url.trim_end_matches('/'), path)
}

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod tests;
