//! Static ignore list.

use std::collections::HashSet;

use crate::domain::models::Issue;

/// Suppresses every notification for a fixed set of issue ids.
#[derive(Debug, Clone, Default)]
pub struct IgnoreFilter {
    ignored: HashSet<u64>,
}

impl IgnoreFilter {
    pub fn new(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            ignored: ids.into_iter().collect(),
        }
    }

    /// `false` when the issue is on the ignore list.
    pub fn allows(&self, issue: &Issue) -> bool {
        !self.ignored.contains(&issue.id)
    }

    pub fn len(&self) -> usize {
        self.ignored.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ignored.is_empty()
    }
}
