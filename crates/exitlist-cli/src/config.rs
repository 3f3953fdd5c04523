//! Sync configuration.
//!
//! Values are layered: built-in defaults, then an optional JSON file, then
//! `EXITLIST_*` environment variables, then command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

use exitlist_ingest::{DEFAULT_SECTION_SELECTOR, ScrapeOptions};

/// Public page listing company withdrawals.
pub const DEFAULT_SOURCE_URL: &str =
    "https://som.yale.edu/story/2022/over-450-companies-have-withdrawn-russia-some-remain";

pub const DEFAULT_STRUCTURED_PATH: &str = "extended-table.json";
pub const DEFAULT_TABLE_NAME: &str = "YaleSonnenfeldList";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "EXITLIST_";

/// Settings for one sync or query invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    pub source_url: String,
    pub structured_path: PathBuf,
    pub table_name: String,
    pub region: String,
    /// Table file; derived from the table name when unset.
    pub store_path: Option<PathBuf>,
    pub section_selector: String,
    pub request_timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            structured_path: PathBuf::from(DEFAULT_STRUCTURED_PATH),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            region: DEFAULT_REGION.to_string(),
            store_path: None,
            section_selector: DEFAULT_SECTION_SELECTOR.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl SyncConfig {
    /// Reads a JSON config file; missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parse config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Defaults, overlaid with `path` when given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies `EXITLIST_*` overrides from the process environment.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(&format!("{ENV_PREFIX}{name}")).filter(|value| !value.trim().is_empty())
        };
        if let Some(value) = var("SOURCE_URL") {
            self.source_url = value;
        }
        if let Some(value) = var("STRUCTURED_PATH") {
            self.structured_path = PathBuf::from(value);
        }
        if let Some(value) = var("TABLE_NAME") {
            self.table_name = value;
        }
        if let Some(value) = var("REGION") {
            self.region = value;
        }
        if let Some(value) = var("STORE_PATH") {
            self.store_path = Some(PathBuf::from(value));
        }
        if let Some(value) = var("SECTION_SELECTOR") {
            self.section_selector = value;
        }
        if let Some(value) = var("REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = parse_timeout(&value)?;
        }
        Ok(self)
    }

    /// The table file, `data/<table_name>.json` unless set explicitly.
    pub fn store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(|| Path::new("data").join(format!("{}.json", self.table_name)))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn scrape_options(&self) -> ScrapeOptions {
        ScrapeOptions::default().with_section_selector(self.section_selector.clone())
    }
}

fn parse_timeout(value: &str) -> Result<u64> {
    let secs: u64 = value
        .trim()
        .parse()
        .with_context(|| format!("{ENV_PREFIX}REQUEST_TIMEOUT_SECS must be seconds, got {value:?}"))?;
    if secs == 0 {
        bail!("{ENV_PREFIX}REQUEST_TIMEOUT_SECS must be greater than zero");
    }
    Ok(secs)
}
