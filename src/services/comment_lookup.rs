//! Comment lookup for issues whose `updated_on` moved without a status
//! change.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Issue, Notification};
use crate::domain::ports::IssueSource;

/// Decide what an update amounts to, given the issue's detail.
///
/// - no journals in the detail: a generic update
/// - latest journal (by id) has notes: a new comment
/// - latest journal has no notes: nothing, it was a field edit
///
/// Id and assignee come from `previous`, the value captured from the old
/// snapshot.
pub fn resolve(previous: &Issue, detail: &Issue) -> Option<Notification> {
    let assignee = previous.assignee_name().map(str::to_string);

    if detail.journals.is_none() {
        return Some(Notification::IssueUpdated {
            issue_id: previous.id,
            assignee,
        });
    }

    let latest = detail.latest_journal()?;
    if !latest.has_notes() {
        return None;
    }

    Some(Notification::CommentAdded {
        issue_id: previous.id,
        assignee,
        text: latest.notes().to_string(),
    })
}

/// Fetches issue details and resolves them into notifications.
#[derive(Clone)]
pub struct CommentLookup {
    source: Arc<dyn IssueSource>,
    timeout: Duration,
}

impl CommentLookup {
    pub fn new(source: Arc<dyn IssueSource>, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    /// Fetch the detail of `previous.id` and resolve it.
    ///
    /// `Ok(None)` means the update was metadata-only. Fetch failures and
    /// timeouts come back as `Err`.
    pub async fn lookup(&self, previous: &Issue) -> DomainResult<Option<Notification>> {
        let detail = tokio::time::timeout(
            self.timeout,
            self.source.fetch_issue_with_journals(previous.id),
        )
        .await
        .map_err(|_| {
            DomainError::Timeout(
                u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                format!("journal lookup for issue {}", previous.id),
            )
        })??;

        Ok(resolve(previous, &detail))
    }
}

impl std::fmt::Debug for CommentLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentLookup")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
