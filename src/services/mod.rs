//! Service layer: change detection and the poll cycle.

pub mod active_window;
pub mod change_classifier;
pub mod comment_lookup;
pub mod ignore_filter;
pub mod notification_formatter;
pub mod notifier;
pub mod snapshot_store;

pub use active_window::ActiveWindow;
pub use change_classifier::{Change, ChangeClassifier, Classification};
pub use comment_lookup::CommentLookup;
pub use ignore_filter::IgnoreFilter;
pub use notification_formatter::NotificationFormatter;
pub use notifier::{CycleReport, Notifier, NotifierConfig};
pub use snapshot_store::SnapshotStore;
