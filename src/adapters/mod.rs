//! Adapters for external systems.
//!
//! Each adapter implements a domain port over HTTP:
//! - `redmine`: [`IssueSource`](crate::domain::ports::IssueSource)
//! - `telegram`: [`ChatSink`](crate::domain::ports::ChatSink)

pub mod redmine;
pub mod telegram;

pub use redmine::RedmineClient;
pub use telegram::TelegramSink;
