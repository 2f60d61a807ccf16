//! Infrastructure layer module
//!
//! Process-level concerns shared by the adapters and the binary:
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod logging;
