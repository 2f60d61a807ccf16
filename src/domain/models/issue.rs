//! Issue and journal models.
//!
//! These map directly onto the tracker's JSON payloads. Values are
//! immutable snapshots: a poll cycle compares them and supersedes them,
//! it never edits one in place.

use serde::{Deserialize, Serialize};

/// Status id the tracker uses for freshly opened issues.
pub const OPEN_STATUS_ID: u64 = 1;

/// Status id of closed issues; excluded from the list fetch by default.
pub const CLOSED_STATUS_ID: u64 = 5;

/// An `{ "id": .., "name": .. }` pair as used for status, priority and
/// assignee fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

impl NamedRef {
    /// Build a reference from an id and a display name.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// One tracker ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Stable identifier, the join key across snapshots.
    pub id: u64,
    #[serde(default)]
    pub subject: String,
    pub status: NamedRef,
    pub priority: NamedRef,
    #[serde(default)]
    pub assigned_to: Option<NamedRef>,
    /// Opaque timestamp, compared for equality only.
    pub updated_on: String,
    /// Only present when fetched with `include=journals`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journals: Option<Vec<Journal>>,
}

impl Issue {
    /// Name of the assignee, or `None` when unassigned or the name is blank.
    pub fn assignee_name(&self) -> Option<&str> {
        self.assigned_to
            .as_ref()
            .map(|a| a.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// The journal entry with the highest id.
    ///
    /// Arrival order from the tracker is not trusted; the id is.
    pub fn latest_journal(&self) -> Option<&Journal> {
        self.journals.as_ref()?.iter().max_by_key(|j| j.id)
    }
}

/// A journal entry: a comment, a metadata-only field change, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    pub id: u64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Journal {
    /// Comment text, empty for metadata-only entries.
    pub fn notes(&self) -> &str {
        self.notes.as_deref().unwrap_or_default()
    }

    /// Whether this entry carries a human comment.
    pub fn has_notes(&self) -> bool {
        !self.notes().is_empty()
    }
}
