//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces that adapters must implement:
//! - IssueSource: issue list and issue detail fetches
//! - ChatSink: message delivery
//! - Clock: current local time
//!
//! The services depend only on these traits, never on a concrete client.

pub mod chat_sink;
pub mod clock;
pub mod issue_source;

pub use chat_sink::ChatSink;
pub use clock::{Clock, SystemClock};
pub use issue_source::IssueSource;
