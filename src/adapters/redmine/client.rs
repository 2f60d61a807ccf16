//! Redmine HTTP client.
//!
//! Implements [`IssueSource`] over the Redmine REST API. All failures map
//! to [`DomainError::Fetch`] or [`DomainError::Decode`]; error strings are
//! scrubbed so the API key never ends up in logs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Issue, TrackerConfig};
use crate::domain::ports::IssueSource;
use crate::infrastructure::logging::scrub;

use super::models::{IssueDetailResponse, IssueListResponse};

/// HTTP client for the Redmine REST API.
#[derive(Debug, Clone)]
pub struct RedmineClient {
    /// The underlying HTTP client.
    http: Client,
    /// Tracker base URL without a trailing slash.
    base_url: String,
    /// REST API key, sent as the `key` query parameter.
    api_key: String,
    /// Status id excluded from the issue list.
    excluded_status_id: u64,
}

impl RedmineClient {
    /// Create a client from the tracker configuration.
    pub fn new(config: &TrackerConfig) -> DomainResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("tracker-herald/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            excluded_status_id: config.excluded_status_id,
        })
    }

    fn list_url(&self) -> String {
        format!(
            "{}/issues.json?key={}&status_id!={}",
            self.base_url, self.api_key, self.excluded_status_id
        )
    }

    fn detail_url(&self, issue_id: u64) -> String {
        format!(
            "{}/issues/{}.json?include=journals&key={}",
            self.base_url, issue_id, self.api_key
        )
    }

    /// GET `url` and return the body of a successful response.
    async fn get_text(&self, url: &str, operation: &str) -> DomainResult<String> {
        let resp = self.http.get(url).send().await.map_err(|e| {
            DomainError::Fetch(scrub(&format!("Redmine {operation} request failed: {e}")))
        })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Fetch(scrub(&format!(
                "Redmine {operation} returned {status}: {body}"
            ))));
        }

        resp.text().await.map_err(|e| {
            DomainError::Fetch(scrub(&format!("Redmine {operation} body read failed: {e}")))
        })
    }
}

/// Decode the list entries one by one, skipping malformed issues.
fn decode_issue_list(resp: IssueListResponse) -> Vec<Issue> {
    let total = resp.issues.len();
    let issues: Vec<Issue> = resp
        .issues
        .into_iter()
        .filter_map(|raw| {
            let id = raw.get("id").cloned();
            match serde_json::from_value::<Issue>(raw) {
                Ok(issue) => Some(issue),
                Err(e) => {
                    tracing::warn!(issue_id = ?id, error = %e, "Skipping malformed issue");
                    None
                }
            }
        })
        .collect();

    if let Some(total_count) = resp.total_count {
        if total_count > total as u64 {
            tracing::debug!(
                returned = total,
                total_count,
                "Issue list is paginated; only the first page is tracked"
            );
        }
    }

    issues
}

#[async_trait]
impl IssueSource for RedmineClient {
    async fn list_issues(&self) -> DomainResult<Vec<Issue>> {
        let body = self.get_text(&self.list_url(), "list_issues").await?;
        let resp: IssueListResponse = serde_json::from_str(&body)
            .map_err(|e| DomainError::Decode(format!("Redmine list_issues parse failed: {e}")))?;

        let issues = decode_issue_list(resp);
        tracing::debug!(count = issues.len(), "Fetched issue list");
        Ok(issues)
    }

    async fn fetch_issue_with_journals(&self, issue_id: u64) -> DomainResult<Issue> {
        let body = self
            .get_text(&self.detail_url(issue_id), "fetch_issue_with_journals")
            .await?;
        let resp: IssueDetailResponse = serde_json::from_str(&body).map_err(|e| {
            DomainError::Decode(format!(
                "Redmine fetch_issue_with_journals parse failed for issue {issue_id}: {e}"
            ))
        })?;
        Ok(resp.issue)
    }
}
