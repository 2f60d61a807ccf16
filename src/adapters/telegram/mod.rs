//! Telegram chat sink.
//!
//! Delivers rendered notifications through the Bot API `sendMessage`
//! method to a single configured chat.

pub mod client;
pub mod models;

pub use client::TelegramSink;
