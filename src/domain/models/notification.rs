//! Notification events and outgoing chat messages.

use serde::{Deserialize, Serialize};

/// Visual severity attached to newly created issues, keyed by priority id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Map a tracker priority id to a severity: 3 → low, 4 → medium,
    /// 5 → high. Every other id carries no marker.
    pub const fn from_priority_id(priority_id: u64) -> Option<Self> {
        match priority_id {
            3 => Some(Self::Low),
            4 => Some(Self::Medium),
            5 => Some(Self::High),
            _ => None,
        }
    }

    /// Marker glyph wrapped around the message.
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Low => "\u{1F7E2}",
            Self::Medium => "\u{1F7E1}",
            Self::High => "\u{1F534}",
        }
    }
}

/// A classified change, ready to be formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Issue id not present in the previous snapshot.
    IssueCreated {
        issue_id: u64,
        subject: String,
        assignee: Option<String>,
        severity: Option<Severity>,
    },
    /// Status name differs between snapshots.
    StatusChanged {
        issue_id: u64,
        old_status: String,
        new_status: String,
        assignee: Option<String>,
        /// Set when the new status is the distinguished open status.
        emphasized: bool,
    },
    /// The most recent journal entry carries a comment.
    CommentAdded {
        issue_id: u64,
        assignee: Option<String>,
        text: String,
    },
    /// Updated, but the detail fetch returned no journals at all.
    IssueUpdated {
        issue_id: u64,
        assignee: Option<String>,
    },
}

impl Notification {
    /// Id of the issue this notification is about.
    pub const fn issue_id(&self) -> u64 {
        match self {
            Self::IssueCreated { issue_id, .. }
            | Self::StatusChanged { issue_id, .. }
            | Self::CommentAdded { issue_id, .. }
            | Self::IssueUpdated { issue_id, .. } => *issue_id,
        }
    }

    /// Short kind label used in logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::IssueCreated { .. } => "issue_created",
            Self::StatusChanged { .. } => "status_changed",
            Self::CommentAdded { .. } => "comment_added",
            Self::IssueUpdated { .. } => "issue_updated",
        }
    }
}

/// Rich-text mode understood by the chat service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
}

/// A rendered message plus its delivery options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub text: String,
    pub parse_mode: Option<ParseMode>,
}

impl OutgoingMessage {
    /// Plain-text message.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: None,
        }
    }

    /// Message rendered as HTML by the chat service.
    pub fn html(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parse_mode: Some(ParseMode::Html),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_from_priority_id() {
        assert_eq!(Severity::from_priority_id(3), Some(Severity::Low));
        assert_eq!(Severity::from_priority_id(4), Some(Severity::Medium));
        assert_eq!(Severity::from_priority_id(5), Some(Severity::High));
        assert_eq!(Severity::from_priority_id(1), None);
        assert_eq!(Severity::from_priority_id(2), None);
        assert_eq!(Severity::from_priority_id(6), None);
    }

    #[test]
    fn test_markers_are_distinct() {
        assert_ne!(Severity::Low.marker(), Severity::Medium.marker());
        assert_ne!(Severity::Medium.marker(), Severity::High.marker());
    }

    #[test]
    fn test_parse_mode_serializes_as_html() {
        assert_eq!(serde_json::to_string(&ParseMode::Html).unwrap(), "\"HTML\"");
    }

    #[test]
    fn test_notification_issue_id_and_kind() {
        let n = Notification::IssueUpdated {
            issue_id: 12,
            assignee: None,
        };
        assert_eq!(n.issue_id(), 12);
        assert_eq!(n.kind(), "issue_updated");
    }
}
