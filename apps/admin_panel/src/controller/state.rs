use std::{fmt, str::FromStr, time::Duration};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Session-scoped list state: which window of the directory is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub page: u32,
    pub page_size: u32,
    pub search_term: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ViewState {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            search_term: String::new(),
        }
    }

    pub fn search(&self) -> Option<&str> {
        Some(self.search_term.as_str()).filter(|term| !term.is_empty())
    }
}

/// What to do with a listing response when a newer Load was issued while it
/// was in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleLoadPolicy {
    /// Render every response in arrival order; the last to resolve wins.
    #[default]
    LastResolved,
    /// Drop responses older than the most recently issued Load.
    LatestIssued,
}

#[derive(Debug, Error)]
#[error("unknown stale load policy `{0}` (expected `last_resolved` or `latest_issued`)")]
pub struct UnknownPolicy(String);

impl FromStr for StaleLoadPolicy {
    type Err = UnknownPolicy;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "last_resolved" => Ok(Self::LastResolved),
            "latest_issued" => Ok(Self::LatestIssued),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for StaleLoadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastResolved => f.write_str("last_resolved"),
            Self::LatestIssued => f.write_str("latest_issued"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    pub page_size: u32,
    pub search_debounce: Duration,
    pub stale_loads: StaleLoadPolicy,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
            stale_loads: StaleLoadPolicy::default(),
        }
    }
}
