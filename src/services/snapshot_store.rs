//! Single-generation snapshot of the tracker's issue list.

use std::collections::{HashMap, HashSet};

use crate::domain::models::Issue;

/// Holds the most recently observed issue list, keyed by id.
///
/// Exactly one generation is kept; [`replace`](SnapshotStore::replace)
/// swaps the whole list, there is no merge.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    issues: HashMap<u64, Issue>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store already holding `issues`.
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        let mut store = Self::new();
        store.replace(issues);
        store
    }

    /// Replace the stored generation with `issues`.
    ///
    /// Should the list carry a duplicate id, the last occurrence wins.
    pub fn replace(&mut self, issues: Vec<Issue>) {
        self.issues = issues.into_iter().map(|issue| (issue.id, issue)).collect();
    }

    pub fn get(&self, issue_id: u64) -> Option<&Issue> {
        self.issues.get(&issue_id)
    }

    pub fn contains(&self, issue_id: u64) -> bool {
        self.issues.contains_key(&issue_id)
    }

    /// Structural equality against a freshly fetched list, ignoring order.
    pub fn matches(&self, issues: &[Issue]) -> bool {
        let distinct: HashSet<u64> = issues.iter().map(|issue| issue.id).collect();
        distinct.len() == self.issues.len()
            && issues
                .iter()
                .all(|issue| self.issues.get(&issue.id) == Some(issue))
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}
