//! Change classification between two issue snapshots.
//!
//! For every issue in the new list that passes the active window and the
//! ignore list, exactly one outcome is chosen:
//! - created: the id is not in the old snapshot
//! - status changed: the status name differs (takes precedence)
//! - possible update: same status, different `updated_on`; resolved later
//!   by a comment lookup
//! - unchanged
//!
//! Issues that disappeared from the list produce nothing.

use chrono::{Datelike, Timelike};

use crate::domain::models::{Issue, Notification, Severity, OPEN_STATUS_ID};

use super::active_window::ActiveWindow;
use super::ignore_filter::IgnoreFilter;
use super::snapshot_store::SnapshotStore;

/// Outcome for a single issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Created(Notification),
    StatusChanged(Notification),
    /// Needs a journal lookup; carries the issue value from the old snapshot.
    PossibleUpdate(Issue),
    Unchanged,
}

/// Result of classifying one poll cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Notifications decided without further I/O.
    pub notifications: Vec<Notification>,
    /// Old issue values whose update must be resolved by a comment lookup.
    pub pending_lookups: Vec<Issue>,
    /// Set when the whole cycle was skipped because of the active window.
    pub outside_window: bool,
    /// Set when the fetched list equals the stored snapshot.
    pub identical: bool,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty() && self.pending_lookups.is_empty()
    }
}

/// Compares snapshots and applies the notification filters.
#[derive(Debug, Clone, Default)]
pub struct ChangeClassifier {
    window: ActiveWindow,
    ignore: IgnoreFilter,
}

impl ChangeClassifier {
    pub fn new(window: ActiveWindow, ignore: IgnoreFilter) -> Self {
        Self { window, ignore }
    }

    /// Classify a single issue against its previous value.
    pub fn classify_issue(old: Option<&Issue>, new: &Issue) -> Change {
        let Some(old) = old else {
            return Change::Created(Notification::IssueCreated {
                issue_id: new.id,
                subject: new.subject.clone(),
                assignee: new.assignee_name().map(str::to_string),
                severity: Severity::from_priority_id(new.priority.id),
            });
        };

        if old.status.name != new.status.name {
            return Change::StatusChanged(Notification::StatusChanged {
                issue_id: new.id,
                old_status: old.status.name.clone(),
                new_status: new.status.name.clone(),
                assignee: new.assignee_name().map(str::to_string),
                emphasized: new.status.id == OPEN_STATUS_ID,
            });
        }

        if old.updated_on != new.updated_on {
            return Change::PossibleUpdate(old.clone());
        }

        Change::Unchanged
    }

    /// Classify a freshly fetched list against the stored snapshot.
    ///
    /// Pure: the snapshot is not touched, replacing it is up to the caller.
    pub fn classify<T>(&self, old: &SnapshotStore, new: &[Issue], now: &T) -> Classification
    where
        T: Datelike + Timelike,
    {
        if old.matches(new) {
            return Classification {
                identical: true,
                ..Classification::default()
            };
        }

        if !self.window.is_active(now) {
            return Classification {
                outside_window: true,
                ..Classification::default()
            };
        }

        let mut classification = Classification::default();
        for issue in new.iter().filter(|issue| self.ignore.allows(issue)) {
            match Self::classify_issue(old.get(issue.id), issue) {
                Change::Created(notification) | Change::StatusChanged(notification) => {
                    classification.notifications.push(notification);
                }
                Change::PossibleUpdate(previous) => classification.pending_lookups.push(previous),
                Change::Unchanged => {}
            }
        }

        tracing::debug!(
            notifications = classification.notifications.len(),
            pending_lookups = classification.pending_lookups.len(),
            "Classified snapshot changes"
        );

        classification
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::NamedRef;
    use chrono::NaiveDate;

    fn issue(id: u64, status: (u64, &str), updated_on: &str) -> Issue {
        Issue {
            id,
            subject: format!("Issue {id}"),
            status: NamedRef::new(status.0, status.1),
            priority: NamedRef::new(4, "High"),
            assigned_to: Some(NamedRef::new(12, "John Doe")),
            updated_on: updated_on.to_string(),
            journals: None,
        }
    }

    fn wednesday_afternoon() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 6)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap()
    }

    fn saturday_afternoon() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_new_issue_is_created() {
        let change = ChangeClassifier::classify_issue(None, &issue(2, (1, "New"), "t1"));
        assert_eq!(
            change,
            Change::Created(Notification::IssueCreated {
                issue_id: 2,
                subject: "Issue 2".to_string(),
                assignee: Some("John Doe".to_string()),
                severity: Some(Severity::Medium),
            })
        );
    }

    #[test]
    fn test_status_change_beats_update() {
        let old = issue(1, (1, "New"), "t1");
        let new = issue(1, (2, "In Progress"), "t2");
        match ChangeClassifier::classify_issue(Some(&old), &new) {
            Change::StatusChanged(Notification::StatusChanged {
                old_status,
                new_status,
                emphasized,
                ..
            }) => {
                assert_eq!(old_status, "New");
                assert_eq!(new_status, "In Progress");
                assert!(!emphasized);
            }
            other => panic!("expected status change, got {other:?}"),
        }
    }

    #[test]
    fn test_reopen_is_emphasized() {
        let old = issue(1, (3, "Resolved"), "t1");
        let new = issue(1, (1, "New"), "t1");
        match ChangeClassifier::classify_issue(Some(&old), &new) {
            Change::StatusChanged(Notification::StatusChanged { emphasized, .. }) => {
                assert!(emphasized);
            }
            other => panic!("expected status change, got {other:?}"),
        }
    }

    #[test]
    fn test_status_id_change_with_same_name_is_not_a_status_change() {
        let old = issue(1, (2, "Open"), "t1");
        let new = issue(1, (7, "Open"), "t1");
        assert_eq!(
            ChangeClassifier::classify_issue(Some(&old), &new),
            Change::Unchanged
        );
    }

    #[test]
    fn test_possible_update_carries_old_value() {
        let old = issue(1, (2, "In Progress"), "t1");
        let new = issue(1, (2, "In Progress"), "t2");
        assert_eq!(
            ChangeClassifier::classify_issue(Some(&old), &new),
            Change::PossibleUpdate(old)
        );
    }

    #[test]
    fn test_end_to_end_single_new_issue() {
        let store = SnapshotStore::from_issues(vec![issue(1, (1, "New"), "t1")]);
        let fetched = vec![issue(1, (1, "New"), "t1"), issue(2, (1, "New"), "t1")];

        let result = ChangeClassifier::default().classify(&store, &fetched, &wednesday_afternoon());

        assert_eq!(result.notifications.len(), 1);
        assert_eq!(result.notifications[0].issue_id(), 2);
        assert_eq!(result.notifications[0].kind(), "issue_created");
        assert!(result.pending_lookups.is_empty());
    }

    #[test]
    fn test_identical_snapshot_short_circuits() {
        let issues = vec![issue(1, (1, "New"), "t1"), issue(2, (2, "In Progress"), "t1")];
        let store = SnapshotStore::from_issues(issues.clone());

        let result = ChangeClassifier::default().classify(&store, &issues, &wednesday_afternoon());

        assert!(result.identical);
        assert!(result.is_empty());
    }

    #[test]
    fn test_outside_window_emits_nothing() {
        let store = SnapshotStore::new();
        let fetched = vec![issue(1, (1, "New"), "t1")];

        let result = ChangeClassifier::default().classify(&store, &fetched, &saturday_afternoon());

        assert!(result.outside_window);
        assert!(result.is_empty());
    }

    #[test]
    fn test_ignored_issue_never_notifies() {
        let classifier = ChangeClassifier::new(ActiveWindow::always(), IgnoreFilter::new([1, 2]));
        let store = SnapshotStore::from_issues(vec![issue(1, (1, "New"), "t1")]);
        let fetched = vec![issue(1, (2, "In Progress"), "t2"), issue(2, (1, "New"), "t1")];

        let result = classifier.classify(&store, &fetched, &wednesday_afternoon());

        assert!(result.is_empty());
        assert!(!result.identical);
    }

    #[test]
    fn test_removed_issue_is_silent() {
        let store = SnapshotStore::from_issues(vec![issue(1, (1, "New"), "t1"), issue(2, (1, "New"), "t1")]);
        let fetched = vec![issue(1, (1, "New"), "t1")];

        let result = ChangeClassifier::default().classify(&store, &fetched, &wednesday_afternoon());

        assert!(result.is_empty());
    }

    #[test]
    fn test_mixed_changes() {
        let store = SnapshotStore::from_issues(vec![
            issue(1, (1, "New"), "t1"),
            issue(2, (2, "In Progress"), "t1"),
            issue(3, (2, "In Progress"), "t1"),
        ]);
        let fetched = vec![
            issue(1, (2, "In Progress"), "t2"),
            issue(2, (2, "In Progress"), "t2"),
            issue(3, (2, "In Progress"), "t1"),
            issue(4, (1, "New"), "t1"),
        ];

        let result = ChangeClassifier::default().classify(&store, &fetched, &wednesday_afternoon());

        let kinds: Vec<(u64, &str)> = result
            .notifications
            .iter()
            .map(|n| (n.issue_id(), n.kind()))
            .collect();
        assert_eq!(kinds, vec![(1, "status_changed"), (4, "issue_created")]);
        assert_eq!(result.pending_lookups.len(), 1);
        assert_eq!(result.pending_lookups[0].id, 2);
        assert_eq!(result.pending_lookups[0].updated_on, "t1");
    }
}
