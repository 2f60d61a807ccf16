//! Port for the issue tracker.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::Issue;

/// Read access to the issue tracker.
///
/// The notifier talks to the tracker exclusively through this trait,
/// which keeps the change classification independent of any HTTP client.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Fetch the current list of (non-closed) issues.
    async fn list_issues(&self) -> DomainResult<Vec<Issue>>;

    /// Fetch one issue with its journal history expanded.
    async fn fetch_issue_with_journals(&self, issue_id: u64) -> DomainResult<Issue>;
}
