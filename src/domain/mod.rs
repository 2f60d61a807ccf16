//! Domain layer for the tracker notifier
//!
//! This module contains the issue model, notification events, configuration
//! types and the port traits that adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
