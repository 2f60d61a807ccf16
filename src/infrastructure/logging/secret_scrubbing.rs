use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Redacts credentials from strings before they reach logs or errors.
///
/// Covers the tracker API key in query strings (`key=...`), bot tokens in
/// bot API paths (`/bot<id>:<secret>/`), bearer tokens and generic
/// `token`/`api_key`/`password` fields.
#[derive(Clone)]
pub struct SecretScrubber {
    query_key_pattern: Regex,
    bot_path_pattern: Regex,
    bearer_pattern: Regex,
    field_pattern: Regex,
}

impl SecretScrubber {
    /// Create a new scrubber
    pub fn new() -> Self {
        Self {
            query_key_pattern: Regex::new(r"([?&](?:key|api_key|token)=)[^&\s)]+")
                .unwrap_or_else(|e| unreachable!("static regex: {e}")),
            bot_path_pattern: Regex::new(r"/bot[0-9]+:[A-Za-z0-9_-]+")
                .unwrap_or_else(|e| unreachable!("static regex: {e}")),
            bearer_pattern: Regex::new(r"Bearer\s+[a-zA-Z0-9\-_\.]+")
                .unwrap_or_else(|e| unreachable!("static regex: {e}")),
            field_pattern: Regex::new(
                r#"(["']?(?:api_key|apikey|bot_token|token|secret|password)["']?\s*[:=]\s*)["']?[^"'\s,}]+["']?"#,
            )
            .unwrap_or_else(|e| unreachable!("static regex: {e}")),
        }
    }

    /// Scrub a message of sensitive data
    pub fn scrub(&self, message: &str) -> String {
        let scrubbed = self
            .query_key_pattern
            .replace_all(message, "${1}[REDACTED]");
        let scrubbed = self
            .bot_path_pattern
            .replace_all(&scrubbed, "/bot[TOKEN_REDACTED]");
        let scrubbed = self
            .bearer_pattern
            .replace_all(&scrubbed, "Bearer [TOKEN_REDACTED]");
        let scrubbed = self.field_pattern.replace_all(&scrubbed, "${1}[REDACTED]");
        scrubbed.into_owned()
    }
}

impl Default for SecretScrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}

/// Scrub with a process-wide scrubber.
pub fn scrub(message: &str) -> String {
    static SCRUBBER: OnceLock<SecretScrubber> = OnceLock::new();
    SCRUBBER.get_or_init(SecretScrubber::new).scrub(message)
}
