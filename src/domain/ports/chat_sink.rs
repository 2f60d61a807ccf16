//! Port for chat delivery.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::OutgoingMessage;

/// Delivers rendered messages to the configured chat.
#[async_trait]
pub trait ChatSink: Send + Sync {
    /// Send one message. Callers log failures and carry on.
    async fn send(&self, message: &OutgoingMessage) -> DomainResult<()>;
}
