pub mod config;
pub mod issue;
pub mod notification;

pub use config::{
    ActiveWindowConfig, ChatConfig, Config, FilterConfig, LoggingConfig, PollingConfig,
    TrackerConfig,
};
pub use issue::{Issue, Journal, NamedRef, CLOSED_STATUS_ID, OPEN_STATUS_ID};
pub use notification::{Notification, OutgoingMessage, ParseMode, Severity};
