//! Command-line entry point and process wiring.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use crate::adapters::{RedmineClient, TelegramSink};
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::{LogConfig, LoggerImpl};
use crate::services::{
    ActiveWindow, ChangeClassifier, IgnoreFilter, NotificationFormatter, Notifier, NotifierConfig,
};

#[derive(Debug, Parser)]
#[command(name = "tracker-herald")]
#[command(about = "Posts issue tracker activity to a chat", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to tracker-herald.yaml plus local overrides)
    #[arg(short, long, env = "HERALD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Run a single poll cycle after loading the baseline, then exit
    #[arg(long)]
    pub once: bool,

    /// Override the configured log level
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Load configuration, start logging and run the notifier.
pub async fn execute(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(level) = cli.log_level {
        config.logging.level = level;
        ConfigLoader::validate(&config)?;
    }

    let _logger = LoggerImpl::init(&LogConfig::from_settings(&config.logging))?;

    let mut notifier = build_notifier(&config)?;
    notifier.initialize().await;

    if cli.once {
        let report = notifier.run_cycle().await;
        if report.fetch_failed {
            anyhow::bail!("poll cycle could not fetch the issue list");
        }
        return Ok(());
    }

    notifier.announce_startup().await;
    notifier.run(shutdown_signal()).await;
    Ok(())
}

/// Wire the HTTP adapters and filters described by `config`.
pub fn build_notifier(config: &Config) -> Result<Notifier> {
    let source = RedmineClient::new(&config.tracker).context("Failed to create tracker client")?;
    let sink = TelegramSink::new(&config.chat).context("Failed to create chat client")?;

    let classifier = ChangeClassifier::new(
        ActiveWindow::from(&config.filters.active_window),
        IgnoreFilter::new(config.filters.ignored_issue_ids.iter().copied()),
    );
    let formatter = NotificationFormatter::new(&config.tracker.base_url);

    tracing::info!(
        base_url = %config.tracker.base_url,
        ignored = config.filters.ignored_issue_ids.len(),
        interval_ms = config.polling.interval_ms,
        "Notifier configured"
    );

    Ok(Notifier::new(
        Arc::new(source),
        Arc::new(sink),
        classifier,
        formatter,
        NotifierConfig::from(config),
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
}
