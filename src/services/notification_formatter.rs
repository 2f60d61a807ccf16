//! Rendering of notifications into chat messages.
//!
//! Every message ends with a deep link `{base_url}/issues/{id}`. New
//! issues with a known priority are wrapped in a severity marker and
//! sent as HTML; status changes back to the open status are underlined.

use crate::domain::models::{Notification, OutgoingMessage};

/// Text sent once the notifier has started.
pub const STARTUP_MESSAGE: &str = "Tracker notifier started and watching for updates.";

/// Pure formatter bound to the tracker's base URL.
#[derive(Debug, Clone)]
pub struct NotificationFormatter {
    base_url: String,
}

impl NotificationFormatter {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Deep link to an issue in the tracker UI.
    pub fn issue_link(&self, issue_id: u64) -> String {
        format!("{}/issues/{issue_id}", self.base_url)
    }

    pub fn format(&self, notification: &Notification) -> OutgoingMessage {
        match notification {
            Notification::IssueCreated {
                issue_id,
                subject,
                assignee,
                severity,
            } => {
                let link = self.issue_link(*issue_id);
                match severity {
                    Some(severity) => {
                        let assignee = assignee.as_deref().map(escape_html);
                        let marker = severity.marker();
                        OutgoingMessage::html(format!(
                            "{marker}New issue #{issue_id}{} - {}\n{link}{marker}",
                            for_assignee(assignee.as_deref()),
                            escape_html(subject),
                        ))
                    }
                    None => OutgoingMessage::plain(format!(
                        "New issue #{issue_id}{} - {subject}\n{link}",
                        for_assignee(assignee.as_deref()),
                    )),
                }
            }
            Notification::StatusChanged {
                issue_id,
                old_status,
                new_status,
                assignee,
                emphasized,
            } => {
                let link = self.issue_link(*issue_id);
                if *emphasized {
                    let assignee = assignee.as_deref().map(escape_html);
                    OutgoingMessage::html(format!(
                        "<u>Issue #{issue_id}{} status changed from \"{}\" to \"{}\"</u>\n{link}",
                        in_parens(assignee.as_deref()),
                        escape_html(old_status),
                        escape_html(new_status),
                    ))
                } else {
                    OutgoingMessage::plain(format!(
                        "Issue #{issue_id}{} status changed from \"{old_status}\" to \"{new_status}\"\n{link}",
                        in_parens(assignee.as_deref()),
                    ))
                }
            }
            Notification::CommentAdded {
                issue_id,
                assignee,
                text,
            } => OutgoingMessage::plain(format!(
                "New comment on issue #{issue_id}{}: {text}\n{}",
                in_parens(assignee.as_deref()),
                self.issue_link(*issue_id),
            )),
            Notification::IssueUpdated { issue_id, assignee } => OutgoingMessage::plain(format!(
                "Issue #{issue_id}{} was updated\n{}",
                in_parens(assignee.as_deref()),
                self.issue_link(*issue_id),
            )),
        }
    }

    /// Message announcing that polling has started.
    pub fn startup(&self) -> OutgoingMessage {
        OutgoingMessage::plain(STARTUP_MESSAGE)
    }
}

fn for_assignee(assignee: Option<&str>) -> String {
    assignee.map_or_else(String::new, |name| format!(" for {name}"))
}

fn in_parens(assignee: Option<&str>) -> String {
    assignee.map_or_else(String::new, |name| format!(" ({name})"))
}

/// Escape the characters the chat's HTML mode treats as markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
