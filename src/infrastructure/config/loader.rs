use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Project config file, merged over the defaults
pub const CONFIG_FILE: &str = "tracker-herald.yaml";

/// Local overrides, merged over the project config
pub const LOCAL_CONFIG_FILE: &str = "tracker-herald.local.yaml";

/// Prefix for structured environment overrides (`HERALD_CHAT__CHAT_ID`)
pub const ENV_PREFIX: &str = "HERALD_";

/// Plain environment variables understood for compatibility with
/// `.env`-style deployments, and the config keys they set.
const LEGACY_ENV: [(&str, &str); 4] = [
    ("BASE_URL", "tracker.base_url"),
    ("REDMINE_API_KEY", "tracker.api_key"),
    ("TELEGRAM_BOT_TOKEN", "chat.bot_token"),
    ("CHAT_ID", "chat.chat_id"),
];

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("tracker.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("tracker.api_key cannot be empty")]
    EmptyApiKey,

    #[error("chat.bot_token cannot be empty")]
    EmptyBotToken,

    #[error("chat.chat_id cannot be empty")]
    EmptyChatId,

    #[error("Invalid polling.interval_ms: {0}. Must be positive")]
    InvalidPollInterval(u64),

    #[error("Invalid polling.lookup_timeout_secs: {0}. Must be positive")]
    InvalidLookupTimeout(u64),

    #[error("Invalid active window: after_hour ({0}) must be below before_hour ({1}), and before_hour at most 24")]
    InvalidHourWindow(u32, u32),

    #[error("Active window must name at least one weekday")]
    EmptyWeekdays,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. tracker-herald.yaml (project config)
    /// 3. tracker-herald.local.yaml (local overrides, optional)
    /// 4. Plain variables: BASE_URL, REDMINE_API_KEY, TELEGRAM_BOT_TOKEN, CHAT_ID
    /// 5. HERALD_* variables, `__` separating nested keys (highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Self::base_figment()
            .merge(Yaml::file(CONFIG_FILE))
            .merge(Yaml::file(LOCAL_CONFIG_FILE))
            .merge(Self::legacy_env())
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring
    /// environment overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Self::base_figment()
            .merge(Yaml::file(path.as_ref()))
            .merge(Self::legacy_env())
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn base_figment() -> Figment {
        Figment::new().merge(Serialized::defaults(Config::default()))
    }

    fn legacy_env() -> Env {
        let names: Vec<&str> = LEGACY_ENV.iter().map(|(name, _)| *name).collect();
        Env::raw().only(&names).map(|key| {
            LEGACY_ENV
                .iter()
                .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
                .map_or_else(|| key.into(), |(_, path)| (*path).into())
        })
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.tracker.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if config.tracker.api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        if config.chat.bot_token.trim().is_empty() {
            return Err(ConfigError::EmptyBotToken);
        }
        if config.chat.chat_id.trim().is_empty() {
            return Err(ConfigError::EmptyChatId);
        }

        if config.polling.interval_ms == 0 {
            return Err(ConfigError::InvalidPollInterval(config.polling.interval_ms));
        }
        if config.polling.lookup_timeout_secs == 0 {
            return Err(ConfigError::InvalidLookupTimeout(
                config.polling.lookup_timeout_secs,
            ));
        }

        let window = &config.filters.active_window;
        if window.after_hour >= window.before_hour || window.before_hour > 24 {
            return Err(ConfigError::InvalidHourWindow(
                window.after_hour,
                window.before_hour,
            ));
        }
        if window.weekdays.is_empty() {
            return Err(ConfigError::EmptyWeekdays);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}
