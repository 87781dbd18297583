use std::{fs, io, path::Path, time::Duration};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

use crate::controller::{
    state::{DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_DEBOUNCE, MAX_PAGE_SIZE},
    ControllerOptions, StaleLoadPolicy,
};

pub const DEFAULT_CONFIG_PATH: &str = "admin_panel.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub page_size: u32,
    pub debounce_ms: u64,
    pub stale_loads: StaleLoadPolicy,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: directory_client::DEFAULT_BASE_URL.into(),
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_SEARCH_DEBOUNCE.as_millis() as u64,
            stale_loads: StaleLoadPolicy::default(),
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    base_url: Option<String>,
    page_size: Option<u32>,
    debounce_ms: Option<u64>,
    stale_loads: Option<StaleLoadPolicy>,
    log_filter: Option<String>,
}

/// Defaults, then the toml file (if present), then environment variables.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();
    if let Some(file_cfg) = read_file_settings(path)? {
        settings.merge_file(file_cfg);
    }
    settings.apply_env(|key| std::env::var(key).ok())?;
    settings.normalize()?;
    Ok(settings)
}

fn read_file_settings(path: &Path) -> anyhow::Result<Option<FileSettings>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    };
    let file_cfg = toml::from_str(&raw)
        .with_context(|| format!("invalid config file '{}'", path.display()))?;
    Ok(Some(file_cfg))
}

fn parse_env<T>(key: &str, raw: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("invalid value '{raw}' for {key}"))
}

impl Settings {
    fn merge_file(&mut self, file_cfg: FileSettings) {
        if let Some(v) = file_cfg.base_url {
            self.base_url = v;
        }
        if let Some(v) = file_cfg.page_size {
            self.page_size = v;
        }
        if let Some(v) = file_cfg.debounce_ms {
            self.debounce_ms = v;
        }
        if let Some(v) = file_cfg.stale_loads {
            self.stale_loads = v;
        }
        if let Some(v) = file_cfg.log_filter {
            self.log_filter = v;
        }
    }

    /// `APP__` variables win over the short names.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        for key in ["PANEL_BASE_URL", "APP__BASE_URL"] {
            if let Some(v) = lookup(key) {
                self.base_url = v;
            }
        }
        for key in ["PANEL_PAGE_SIZE", "APP__PAGE_SIZE"] {
            if let Some(v) = lookup(key) {
                self.page_size = parse_env(key, &v)?;
            }
        }
        if let Some(v) = lookup("APP__DEBOUNCE_MS") {
            self.debounce_ms = parse_env("APP__DEBOUNCE_MS", &v)?;
        }
        if let Some(v) = lookup("APP__STALE_LOADS") {
            self.stale_loads = parse_env("APP__STALE_LOADS", &v)?;
        }
        for key in ["LOG_LEVEL", "APP__LOG_FILTER"] {
            if let Some(v) = lookup(key) {
                self.log_filter = v;
            }
        }
        Ok(())
    }

    /// Command-line flags override everything loaded so far.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        page_size: Option<u32>,
    ) -> anyhow::Result<Self> {
        if let Some(v) = base_url {
            self.base_url = v;
        }
        if let Some(v) = page_size {
            self.page_size = v;
        }
        self.normalize()?;
        Ok(self)
    }

    fn normalize(&mut self) -> anyhow::Result<()> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        let parsed =
            Url::parse(trimmed).with_context(|| format!("invalid base url '{}'", self.base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "base url '{}' must use http or https, got '{}'",
                self.base_url,
                parsed.scheme()
            );
        }
        self.base_url = trimmed.to_string();
        self.page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);
        if self.log_filter.trim().is_empty() {
            self.log_filter = Settings::default().log_filter;
        }
        Ok(())
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            page_size: self.page_size,
            search_debounce: Duration::from_millis(self.debounce_ms),
            stale_loads: self.stale_loads,
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
