use serde::{Deserialize, Serialize};

use crate::{
    domain::Employee,
    error::{ApplicationError, EnvelopeError},
};

const UNKNOWN_SERVER_ERROR: &str = "unknown server error";

/// The `{success, data, error}` wrapper every backend response comes in.
///
/// Listing responses also carry a `pagination` descriptor next to `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            pagination: None,
            error: None,
        }
    }

    pub fn paged(data: T, pagination: Pagination) -> Self {
        Self {
            pagination: Some(pagination),
            ..Self::ok(data)
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            pagination: None,
            error: Some(message.into()),
        }
    }

    fn rejection(&mut self) -> Option<ApplicationError> {
        if self.success {
            return None;
        }
        let message = self
            .error
            .take()
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_SERVER_ERROR.to_string());
        Some(ApplicationError::new(message))
    }

    pub fn into_data(mut self) -> Result<T, EnvelopeError> {
        if let Some(rejected) = self.rejection() {
            return Err(rejected.into());
        }
        self.data.ok_or(EnvelopeError::MissingField("data"))
    }

    pub fn into_page(mut self) -> Result<(T, Pagination), EnvelopeError> {
        if let Some(rejected) = self.rejection() {
            return Err(rejected.into());
        }
        let pagination = self
            .pagination
            .ok_or(EnvelopeError::MissingField("pagination"))?;
        let data = self.data.ok_or(EnvelopeError::MissingField("data"))?;
        Ok((data, pagination))
    }
}

/// Pagination descriptor: `{page, limit, total, pages}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u32,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit)) as u32
        };
        Self {
            page,
            limit,
            total,
            pages,
        }
    }

    /// Number of page controls to draw; an empty result still shows page 1.
    pub fn page_count(&self) -> u32 {
        self.pages.max(1)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }

    /// 1-based inclusive item range shown on this page, `(0, 0)` when empty.
    pub fn showing_range(&self) -> (u64, u64) {
        if self.total == 0 {
            return (0, 0);
        }
        let limit = u64::from(self.limit);
        let page = u64::from(self.page.max(1));
        let first = (page - 1) * limit + 1;
        let last = (page * limit).min(self.total);
        (first, last)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub employees: Vec<Employee>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeadcountSummary {
    pub total: u64,
    #[serde(rename = "activos")]
    pub active: u64,
    #[serde(rename = "inactivos")]
    pub inactive: u64,
    #[serde(rename = "vacaciones")]
    pub on_vacation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCount {
    #[serde(rename = "rol")]
    pub role: String,
    #[serde(rename = "cantidad")]
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    #[serde(rename = "empleados")]
    pub headcount: HeadcountSummary,
    #[serde(default)]
    pub roles: Vec<RoleCount>,
}

/// Liveness payload from `/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self.status.as_str(), "healthy" | "ok")
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
