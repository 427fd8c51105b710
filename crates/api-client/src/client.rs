use std::time::Duration;

use agentlens_core::{
    DashboardStats, HealthResponse, PaginatedResponse, Project, Session, SessionDetail,
    TimelineEvent, ToolStats,
};

use crate::error::ApiError;
use crate::retry::{retry_get, RetryConfig};

/// Filters for the session list route. All fields are optional; the backend
/// defaults to the first page of fifty most-recent sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionListQuery {
    pub status: Option<String>,
    pub project_id: Option<i64>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// Typed HTTP client for the monitor API.
///
/// Provides one high-level method per endpoint plus a retrying variant for
/// the timeline route, which the TUI polls on every refresh tick.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client with the given base URL and timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Network)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create from an existing `reqwest::Client` (e.g. shared in tests).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let resp = self.client.get(url).send().await.map_err(ApiError::Network)?;
        parse_response(resp).await
    }

    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.get_json(&self.url("/health")).await
    }

    pub async fn list_sessions(
        &self,
        query: &SessionListQuery,
    ) -> Result<PaginatedResponse<Session>, ApiError> {
        let mut url = self.url("/sessions");

        let mut params = Vec::new();
        if let Some(ref status) = query.status {
            params.push(format!("status={status}"));
        }
        if let Some(project_id) = query.project_id {
            params.push(format!("project_id={project_id}"));
        }
        if let Some(ref search) = query.search {
            params.push(format!("search={search}"));
        }
        if let Some(page) = query.page {
            params.push(format!("page={page}"));
        }
        if let Some(page_size) = query.page_size {
            params.push(format!("page_size={page_size}"));
        }
        if !params.is_empty() {
            url = format!("{}?{}", url, params.join("&"));
        }

        self.get_json(&url).await
    }

    pub async fn get_session(&self, session_id: &str) -> Result<SessionDetail, ApiError> {
        self.get_json(&self.url(&format!("/sessions/{session_id}")))
            .await
    }

    /// Fetch the merged chronological event stream for a session.
    pub async fn session_timeline(
        &self,
        session_id: &str,
    ) -> Result<Vec<TimelineEvent>, ApiError> {
        self.get_json(&self.url(&format!("/sessions/{session_id}/timeline")))
            .await
    }

    /// Timeline fetch with backoff, for the polling path: a transient 5xx or
    /// network hiccup should not blank the view.
    pub async fn session_timeline_retrying(
        &self,
        session_id: &str,
        config: &RetryConfig,
    ) -> Result<Vec<TimelineEvent>, ApiError> {
        let url = self.url(&format!("/sessions/{session_id}/timeline"));
        let resp = retry_get(&self.client, &url, config).await?;
        parse_response(resp).await
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get_json(&self.url("/projects")).await
    }

    pub async fn tool_stats(&self) -> Result<Vec<ToolStats>, ApiError> {
        self.get_json(&self.url("/tools/stats")).await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get_json(&self.url("/dashboard/stats")).await
    }
}

/// Parse an HTTP response: return the deserialized body on 2xx,
/// or an `ApiError::Http` carrying the status and body text.
async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Http { status, body });
    }
    resp.json().await.map_err(ApiError::Decode)
}
