//! HTTP client for the employee directory backend.
//!
//! One async call per backend capability. Every failure is surfaced to the
//! caller as a [`ClientError`]; nothing is retried here.

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::{Employee, EmployeeId},
    protocol::{Envelope, HealthStatus, PageResult, Stats},
};
use tracing::debug;

pub mod error;

pub use error::{ClientError, ErrorKind};
pub use reqwest::StatusCode;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

#[async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn list_employees(
        &self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
    ) -> Result<PageResult, ClientError>;
    async fn get_employee(&self, id: EmployeeId) -> Result<Employee, ClientError>;
    async fn get_stats(&self) -> Result<Stats, ClientError>;
    async fn health_check(&self) -> Result<HealthStatus, ClientError>;
}

#[derive(Debug, Serialize)]
struct ListEmployeesQuery<'a> {
    page: u32,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: Client,
    base_url: String,
}

impl Default for DirectoryClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl DirectoryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), base_url)
    }

    pub fn with_http_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "directory request");
        self.http
            .get(url)
            .header(header::CONTENT_TYPE, "application/json")
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await.map_err(ClientError::Connectivity)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Transport { status });
        }
        let body = response.bytes().await.map_err(ClientError::Connectivity)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl DirectoryApi for DirectoryClient {
    async fn list_employees(
        &self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
    ) -> Result<PageResult, ClientError> {
        let query = ListEmployeesQuery {
            page,
            limit: page_size,
            search: search.filter(|term| !term.is_empty()),
        };
        let envelope: Envelope<Vec<Employee>> =
            self.fetch(self.get("/empleados").query(&query)).await?;
        let (employees, pagination) = envelope.into_page()?;
        Ok(PageResult {
            employees,
            pagination,
        })
    }

    async fn get_employee(&self, id: EmployeeId) -> Result<Employee, ClientError> {
        let envelope: Envelope<Employee> =
            self.fetch(self.get(&format!("/empleados/{id}"))).await?;
        Ok(envelope.into_data()?)
    }

    async fn get_stats(&self) -> Result<Stats, ClientError> {
        let envelope: Envelope<Stats> = self.fetch(self.get("/stats")).await?;
        Ok(envelope.into_data()?)
    }

    async fn health_check(&self) -> Result<HealthStatus, ClientError> {
        let payload: serde_json::Value = self.fetch(self.get("/health")).await?;
        if payload.get("success").is_some() {
            let envelope: Envelope<HealthStatus> = serde_json::from_value(payload)?;
            return Ok(envelope.into_data()?);
        }
        Ok(serde_json::from_value(payload)?)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
