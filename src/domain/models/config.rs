use std::path::PathBuf;

use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize};

use super::issue::CLOSED_STATUS_ID;

/// Main configuration structure for the notifier
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Issue tracker connection
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// Chat delivery target
    #[serde(default)]
    pub chat: ChatConfig,

    /// Poll timing
    #[serde(default)]
    pub polling: PollingConfig,

    /// Noise suppression
    #[serde(default)]
    pub filters: FilterConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Issue tracker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TrackerConfig {
    /// Base URL of the tracker, also used to build issue links
    #[serde(default)]
    pub base_url: String,

    /// REST API key
    #[serde(default, deserialize_with = "string_or_number")]
    pub api_key: String,

    /// Status id excluded from the issue list (closed issues)
    #[serde(default = "default_excluded_status_id")]
    pub excluded_status_id: u64,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

const fn default_excluded_status_id() -> u64 {
    CLOSED_STATUS_ID
}

const fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            excluded_status_id: default_excluded_status_id(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Chat delivery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChatConfig {
    /// Bot token
    #[serde(default)]
    pub bot_token: String,

    /// Target chat id (numeric id or `@channel` name)
    #[serde(default, deserialize_with = "string_or_number")]
    pub chat_id: String,

    /// Bot API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Send a message once the notifier has started
    #[serde(default = "default_true")]
    pub announce_startup: bool,
}

fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_base: default_api_base(),
            announce_startup: default_true(),
        }
    }
}

/// Poll timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PollingConfig {
    /// Interval between poll cycles in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Upper bound for a single comment lookup, in seconds
    #[serde(default = "default_lookup_timeout_secs")]
    pub lookup_timeout_secs: u64,
}

const fn default_interval_ms() -> u64 {
    60_000
}

const fn default_lookup_timeout_secs() -> u64 {
    30
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            lookup_timeout_secs: default_lookup_timeout_secs(),
        }
    }
}

/// Notification filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FilterConfig {
    /// Issue ids that never produce notifications
    #[serde(default)]
    pub ignored_issue_ids: Vec<u64>,

    /// Hours during which notifications are sent
    #[serde(default)]
    pub active_window: ActiveWindowConfig,
}

/// Active hours. Both hour bounds are exclusive: the defaults admit
/// 09:00 through 19:59.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ActiveWindowConfig {
    #[serde(default = "default_weekdays")]
    pub weekdays: Vec<Weekday>,

    #[serde(default = "default_after_hour")]
    pub after_hour: u32,

    #[serde(default = "default_before_hour")]
    pub before_hour: u32,
}

fn default_weekdays() -> Vec<Weekday> {
    vec![
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ]
}

const fn default_after_hour() -> u32 {
    8
}

const fn default_before_hour() -> u32 {
    20
}

impl Default for ActiveWindowConfig {
    fn default() -> Self {
        Self {
            weekdays: default_weekdays(),
            after_hour: default_after_hour(),
            before_hour: default_before_hour(),
        }
    }
}

/// Accept credentials that environment providers parse as numbers,
/// such as a negative chat id.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Signed(n) => n.to_string(),
        Raw::Unsigned(n) => n.to_string(),
    })
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.polling.interval_ms, 60_000);
        assert_eq!(config.tracker.excluded_status_id, 5);
        assert_eq!(config.chat.api_base, "https://api.telegram.org");
        assert!(config.filters.ignored_issue_ids.is_empty());
        assert_eq!(config.filters.active_window.weekdays.len(), 5);
        assert_eq!(config.filters.active_window.after_hour, 8);
        assert_eq!(config.filters.active_window.before_hour, 20);
    }

    #[test]
    fn test_numeric_chat_id() {
        let config: Config = serde_yaml::from_str("chat:\n  chat_id: -1001234567\n").unwrap();
        assert_eq!(config.chat.chat_id, "-1001234567");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r"
tracker:
  base_url: https://tracker.example.com
filters:
  ignored_issue_ids: [71060]
  active_window:
    weekdays: [Mon, Sat]
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.tracker.base_url, "https://tracker.example.com");
        assert_eq!(config.tracker.request_timeout_secs, 30);
        assert_eq!(config.filters.ignored_issue_ids, vec![71060]);
        assert_eq!(
            config.filters.active_window.weekdays,
            vec![Weekday::Mon, Weekday::Sat]
        );
        assert_eq!(config.filters.active_window.before_hour, 20);
        assert_eq!(config.polling.lookup_timeout_secs, 30);
    }
}
