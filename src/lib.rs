//! Tracker Herald - issue tracker activity notifier
//!
//! Polls an issue tracker on a fixed interval, diffs the issue list
//! against the previous snapshot and posts new issues, status changes and
//! comments to a chat.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): issue model, notifications, config types, ports
//! - **Service Layer** (`services`): filters, change classification, formatting, poll cycle
//! - **Adapters** (`adapters`): Redmine issue source, Telegram chat sink
//! - **Infrastructure Layer** (`infrastructure`): configuration loading, logging
//! - **CLI Layer** (`cli`): argument parsing and process wiring
//!
//! # Example
//!
//! ```ignore
//! use tracker_herald::cli::{build_notifier, Cli};
//! use tracker_herald::infrastructure::config::ConfigLoader;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let mut notifier = build_notifier(&config)?;
//!     notifier.initialize().await;
//!     notifier.run_cycle().await;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{Config, Issue, Journal, NamedRef, Notification, OutgoingMessage};
pub use domain::ports::{ChatSink, Clock, IssueSource};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{ChangeClassifier, CycleReport, Notifier, NotifierConfig, SnapshotStore};
