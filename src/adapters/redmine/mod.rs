//! Redmine issue source.
//!
//! Fetches the open issue list and single issues with their journal
//! history over the Redmine REST API.

pub mod client;
pub mod models;

pub use client::RedmineClient;
