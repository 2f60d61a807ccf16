//! Redmine REST API response envelopes.
//!
//! The issue payload itself maps onto [`Issue`]; these wrappers only
//! unpack the top-level objects.

use serde::Deserialize;

use crate::domain::models::Issue;

/// Response of `GET /issues.json`.
///
/// Entries are kept as raw JSON so a single malformed issue can be
/// skipped instead of failing the whole list.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueListResponse {
    pub issues: Vec<serde_json::Value>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

/// Response of `GET /issues/{id}.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueDetailResponse {
    pub issue: Issue,
}
