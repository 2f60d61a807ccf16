//! Telegram Bot API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{ChatConfig, OutgoingMessage};
use crate::domain::ports::ChatSink;
use crate::infrastructure::logging::scrub;

use super::models::{ApiResponse, SendMessageRequest};

const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends messages to one chat through the Bot API.
#[derive(Debug, Clone)]
pub struct TelegramSink {
    http: Client,
    /// Bot API base URL without a trailing slash.
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramSink {
    /// Create a sink from the chat configuration.
    pub fn new(config: &ChatConfig) -> DomainResult<Self> {
        let http = Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| DomainError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
        })
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.bot_token)
    }
}

#[async_trait]
impl ChatSink for TelegramSink {
    async fn send(&self, message: &OutgoingMessage) -> DomainResult<()> {
        let body = SendMessageRequest {
            chat_id: self.chat_id.clone(),
            text: message.text.clone(),
            parse_mode: message.parse_mode,
        };

        let resp = self
            .http
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                DomainError::Delivery(scrub(&format!("Telegram sendMessage request failed: {e}")))
            })?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        let parsed: Option<ApiResponse> = serde_json::from_str(&text).ok();

        match parsed {
            Some(api) if status.is_success() && api.ok => Ok(()),
            Some(api) => Err(DomainError::Delivery(format!(
                "Telegram sendMessage returned {status}: {}",
                api.description.unwrap_or_else(|| "no description".to_string())
            ))),
            None => Err(DomainError::Delivery(scrub(&format!(
                "Telegram sendMessage returned {status}: {text}"
            )))),
        }
    }
}
