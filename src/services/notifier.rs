//! Poll cycle driver.
//!
//! The [`Notifier`] owns the snapshot store and is its only writer. A
//! cycle fetches the issue list, classifies it against the store, resolves
//! pending comment lookups concurrently, delivers the resulting messages
//! and finally replaces the snapshot. Cycles run strictly one after the
//! other: [`Notifier::run`] awaits each cycle before accepting the next
//! timer tick, and ticks missed meanwhile are skipped.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::{interval, Instant, MissedTickBehavior};

use crate::domain::models::{Config, Issue, Notification};
use crate::domain::ports::{ChatSink, Clock, IssueSource, SystemClock};

use super::change_classifier::ChangeClassifier;
use super::comment_lookup::CommentLookup;
use super::notification_formatter::NotificationFormatter;
use super::snapshot_store::SnapshotStore;

/// Runtime settings for the notifier.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Interval between poll cycles.
    pub poll_interval: Duration,
    /// Upper bound for a single comment lookup.
    pub lookup_timeout: Duration,
    /// Send a message once the initial snapshot is loaded.
    pub announce_startup: bool,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(60_000),
            lookup_timeout: Duration::from_secs(30),
            announce_startup: true,
        }
    }
}

impl From<&Config> for NotifierConfig {
    fn from(config: &Config) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.polling.interval_ms),
            lookup_timeout: Duration::from_secs(config.polling.lookup_timeout_secs),
            announce_startup: config.chat.announce_startup,
        }
    }
}

/// What a single poll cycle did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Issues in the fetched list.
    pub fetched: usize,
    /// The list fetch failed; the snapshot was left untouched.
    pub fetch_failed: bool,
    /// The fetched list equalled the stored snapshot.
    pub identical: bool,
    /// Changes were dropped because the active window was closed.
    pub outside_window: bool,
    /// Messages delivered successfully.
    pub notifications_sent: usize,
    /// Messages the chat sink rejected.
    pub delivery_failures: usize,
    /// Comment lookups that failed or timed out; retried next cycle.
    pub lookups_failed: usize,
}

/// Polls the tracker and posts change notifications to the chat.
pub struct Notifier {
    source: Arc<dyn IssueSource>,
    sink: Arc<dyn ChatSink>,
    clock: Arc<dyn Clock>,
    classifier: ChangeClassifier,
    formatter: NotificationFormatter,
    lookup: CommentLookup,
    store: SnapshotStore,
    config: NotifierConfig,
    cycles: u64,
}

impl Notifier {
    /// Create a notifier with an empty snapshot and the system clock.
    pub fn new(
        source: Arc<dyn IssueSource>,
        sink: Arc<dyn ChatSink>,
        classifier: ChangeClassifier,
        formatter: NotificationFormatter,
        config: NotifierConfig,
    ) -> Self {
        let lookup = CommentLookup::new(Arc::clone(&source), config.lookup_timeout);
        Self {
            source,
            sink,
            clock: Arc::new(SystemClock),
            classifier,
            formatter,
            lookup,
            store: SnapshotStore::new(),
            config,
            cycles: 0,
        }
    }

    /// Replace the clock used for the active-window check.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Current snapshot.
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Number of cycles run so far.
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Load the initial snapshot.
    ///
    /// A failed fetch is logged and leaves the snapshot empty, so the
    /// first cycle reports every open issue as new.
    pub async fn initialize(&mut self) -> usize {
        match self.source.list_issues().await {
            Ok(issues) => {
                let count = issues.len();
                self.store.replace(issues);
                tracing::info!(issues = count, "Initial snapshot loaded");
                count
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load initial snapshot, starting empty");
                0
            }
        }
    }

    /// Post the startup message if enabled.
    pub async fn announce_startup(&self) {
        if !self.config.announce_startup {
            return;
        }
        if let Err(e) = self.sink.send(&self.formatter.startup()).await {
            tracing::warn!(error = %e, "Failed to send startup message");
        }
    }

    /// Run one poll cycle to completion.
    #[tracing::instrument(name = "poll_cycle", skip_all, fields(cycle = self.cycles + 1))]
    pub async fn run_cycle(&mut self) -> CycleReport {
        self.cycles += 1;
        let started = Instant::now();
        let mut report = CycleReport::default();

        let fetched = match self.source.list_issues().await {
            Ok(issues) => issues,
            Err(e) => {
                tracing::warn!(error = %e, "Issue list fetch failed, skipping cycle");
                report.fetch_failed = true;
                return report;
            }
        };
        report.fetched = fetched.len();

        let now = self.clock.now();
        let classification = self.classifier.classify(&self.store, &fetched, &now);
        report.identical = classification.identical;
        report.outside_window = classification.outside_window;

        for notification in &classification.notifications {
            self.deliver(notification, &mut report).await;
        }

        let lookups = classification.pending_lookups.iter().map(|previous| {
            let lookup = self.lookup.clone();
            async move { (previous, lookup.lookup(previous).await) }
        });

        let mut retry_next_cycle: Vec<&Issue> = Vec::new();
        for (previous, outcome) in join_all(lookups).await {
            match outcome {
                Ok(Some(notification)) => self.deliver(&notification, &mut report).await,
                Ok(None) => {
                    tracing::debug!(issue_id = previous.id, "Update without comment, nothing to send");
                }
                Err(e) => {
                    tracing::warn!(issue_id = previous.id, error = %e, "Comment lookup failed, will retry next cycle");
                    retry_next_cycle.push(previous);
                }
            }
        }
        report.lookups_failed = retry_next_cycle.len();

        let next_generation = if retry_next_cycle.is_empty() {
            fetched
        } else {
            Self::keep_previous(fetched, &retry_next_cycle)
        };
        self.store.replace(next_generation);

        tracing::info!(
            fetched = report.fetched,
            sent = report.notifications_sent,
            delivery_failures = report.delivery_failures,
            lookups_failed = report.lookups_failed,
            identical = report.identical,
            outside_window = report.outside_window,
            duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Poll cycle complete"
        );

        report
    }

    /// Drive poll cycles until `shutdown` resolves.
    ///
    /// The first cycle runs one interval after the call; call
    /// [`initialize`](Self::initialize) beforehand. A cycle in progress is
    /// always finished before shutdown is observed.
    pub async fn run<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()> + Send,
    {
        let mut ticker = interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately.
        ticker.tick().await;

        tracing::info!(
            interval_ms = u64::try_from(self.config.poll_interval.as_millis()).unwrap_or(u64::MAX),
            "Waiting for tracker updates"
        );

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                () = &mut shutdown => {
                    tracing::info!(cycles = self.cycles, "Shutdown requested, stopping poll loop");
                    break;
                }
                _ = ticker.tick() => {
                    self.run_cycle().await;
                }
            }
        }
    }

    async fn deliver(&self, notification: &Notification, report: &mut CycleReport) {
        let message = self.formatter.format(notification);
        match self.sink.send(&message).await {
            Ok(()) => {
                report.notifications_sent += 1;
                tracing::debug!(
                    issue_id = notification.issue_id(),
                    kind = notification.kind(),
                    "Notification sent"
                );
            }
            Err(e) => {
                report.delivery_failures += 1;
                tracing::warn!(
                    issue_id = notification.issue_id(),
                    kind = notification.kind(),
                    error = %e,
                    "Notification delivery failed"
                );
            }
        }
    }

    /// Substitute the previous value for issues whose lookup failed, so the
    /// next cycle sees their `updated_on` change again.
    fn keep_previous(fetched: Vec<Issue>, previous: &[&Issue]) -> Vec<Issue> {
        fetched
            .into_iter()
            .map(|issue| {
                previous
                    .iter()
                    .find(|p| p.id == issue.id)
                    .map_or(issue, |p| (*p).clone())
            })
            .collect()
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("snapshot_len", &self.store.len())
            .field("config", &self.config)
            .field("cycles", &self.cycles)
            .finish_non_exhaustive()
    }
}
