use std::{fs, path::Path, str::FromStr};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::carousel::DEFAULT_PAGE_SIZE;

pub const SETTINGS_FILE: &str = "portfolio.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceKind {
    Remote,
    #[default]
    Cache,
}

impl FromStr for SourceKind {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "remote" | "api" => Ok(Self::Remote),
            "cache" | "snapshot" => Ok(Self::Cache),
            other => Err(anyhow!("unknown work source '{other}' (expected remote or cache)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: Option<String>,
    pub cache_database_url: String,
    pub page_size: usize,
    pub work_source: SourceKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: None,
            cache_database_url: "sqlite://./data/portfolio-cache.db".into(),
            page_size: DEFAULT_PAGE_SIZE,
            work_source: SourceKind::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_url: Option<String>,
    cache_database_url: Option<String>,
    page_size: Option<usize>,
    work_source: Option<String>,
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

/// Defaults, then the settings file, then environment variables.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.api_url {
                    settings.api_url = Some(v);
                }
                if let Some(v) = file_cfg.cache_database_url {
                    settings.cache_database_url = v;
                }
                if let Some(v) = file_cfg.page_size {
                    apply_page_size(&mut settings, v);
                }
                if let Some(v) = file_cfg.work_source {
                    apply_work_source(&mut settings, &v);
                }
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "ignoring unreadable settings file");
            }
        }
    }

    if let Some(v) = env("PORTFOLIO_API_URL") {
        settings.api_url = Some(v);
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = Some(v);
    }

    if let Some(v) = env("PORTFOLIO_CACHE_DATABASE_URL") {
        settings.cache_database_url = v;
    }
    if let Some(v) = env("APP__CACHE_DATABASE_URL") {
        settings.cache_database_url = v;
    }

    if let Some(v) = env("APP__PAGE_SIZE") {
        match v.parse::<usize>() {
            Ok(parsed) => apply_page_size(&mut settings, parsed),
            Err(error) => warn!(value = %v, %error, "ignoring invalid APP__PAGE_SIZE"),
        }
    }

    if let Some(v) = env("APP__WORK_SOURCE") {
        apply_work_source(&mut settings, &v);
    }

    settings.api_url = settings
        .api_url
        .take()
        .filter(|raw| !raw.trim().is_empty());

    settings
}

fn apply_page_size(settings: &mut Settings, page_size: usize) {
    if page_size == 0 {
        warn!("ignoring page size 0; keeping {}", settings.page_size);
        return;
    }
    settings.page_size = page_size;
}

fn apply_work_source(settings: &mut Settings, raw: &str) {
    match raw.parse::<SourceKind>() {
        Ok(kind) => settings.work_source = kind,
        Err(error) => warn!(%error, "ignoring work source setting"),
    }
}

/// Checks that the works API base is an absolute http(s) URL and strips any
/// trailing slash.
pub fn validate_api_url(raw: &str) -> Result<String> {
    let parsed = Url::parse(raw.trim()).with_context(|| format!("invalid api url '{raw}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(anyhow!("api url must start with http:// or https://"));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

pub fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return Settings::default().cache_database_url;
    }

    if raw_database_url.starts_with("sqlite:") || raw_database_url.contains("://") {
        return raw_database_url.to_string();
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
