//! Common test utilities for integration tests
//!
//! In-memory implementations of the notifier's ports plus issue fixtures.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, TimeZone};

use tracker_herald::domain::models::{Issue, Journal, NamedRef, OutgoingMessage};
use tracker_herald::domain::ports::{ChatSink, Clock, IssueSource};
use tracker_herald::services::{
    ActiveWindow, ChangeClassifier, IgnoreFilter, NotificationFormatter, Notifier, NotifierConfig,
};
use tracker_herald::{DomainError, DomainResult};

pub const BASE_URL: &str = "https://tracker.example.com";

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Build an issue with a status, priority and `updated_on` stamp.
pub fn issue(id: u64, status: (u64, &str), updated_on: &str) -> Issue {
    Issue {
        id,
        subject: format!("Issue {id}"),
        status: NamedRef::new(status.0, status.1),
        priority: NamedRef::new(2, "Normal"),
        assigned_to: Some(NamedRef::new(12, "John Doe")),
        updated_on: updated_on.to_string(),
        journals: None,
    }
}

/// Copy of `base` carrying the given journal entries.
pub fn with_journals(base: &Issue, journals: &[(u64, &str)]) -> Issue {
    let mut detail = base.clone();
    detail.journals = Some(
        journals
            .iter()
            .map(|(id, notes)| Journal {
                id: *id,
                notes: Some((*notes).to_string()),
            })
            .collect(),
    );
    detail
}

/// Issue source returning whatever list and details the test configured.
#[derive(Default)]
pub struct FakeIssueSource {
    list: Mutex<Option<Vec<Issue>>>,
    details: Mutex<HashMap<u64, Issue>>,
    list_calls: AtomicUsize,
    detail_calls: Mutex<Vec<u64>>,
}

impl FakeIssueSource {
    pub fn with_issues(issues: Vec<Issue>) -> Arc<Self> {
        let source = Self::default();
        source.set_issues(issues);
        Arc::new(source)
    }

    pub fn set_issues(&self, issues: Vec<Issue>) {
        *self.list.lock().unwrap() = Some(issues);
    }

    /// Make the list fetch fail until `set_issues` is called again.
    pub fn fail_list(&self) {
        *self.list.lock().unwrap() = None;
    }

    pub fn set_detail(&self, detail: Issue) {
        self.details.lock().unwrap().insert(detail.id, detail);
    }

    pub fn remove_detail(&self, issue_id: u64) {
        self.details.lock().unwrap().remove(&issue_id);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> Vec<u64> {
        self.detail_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueSource for FakeIssueSource {
    async fn list_issues(&self) -> DomainResult<Vec<Issue>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.list
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| DomainError::Fetch("tracker unavailable".to_string()))
    }

    async fn fetch_issue_with_journals(&self, issue_id: u64) -> DomainResult<Issue> {
        self.detail_calls.lock().unwrap().push(issue_id);
        self.details
            .lock()
            .unwrap()
            .get(&issue_id)
            .cloned()
            .ok_or_else(|| DomainError::Fetch(format!("issue {issue_id} detail unavailable")))
    }
}

/// Chat sink that records every message it is asked to send.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<OutgoingMessage>>,
    failing: Mutex<bool>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    pub fn sent(&self) -> Vec<OutgoingMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|m| m.text).collect()
    }
}

#[async_trait]
impl ChatSink for RecordingSink {
    async fn send(&self, message: &OutgoingMessage) -> DomainResult<()> {
        if *self.failing.lock().unwrap() {
            return Err(DomainError::Delivery("chat unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Clock frozen at a settable local time.
pub struct FixedClock {
    now: Mutex<DateTime<Local>>,
}

impl FixedClock {
    pub fn at(year: i32, month: u32, day: u32, hour: u32) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(local(year, month, day, hour)),
        })
    }

    pub fn set(&self, year: i32, month: u32, day: u32, hour: u32) {
        *self.now.lock().unwrap() = local(year, month, day, hour);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock().unwrap()
    }
}

fn local(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Local> {
    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap();
    Local.from_local_datetime(&naive).earliest().unwrap()
}

/// Wednesday 2024-03-06, 14:00 local time: inside the default window.
pub fn wednesday_afternoon() -> Arc<FixedClock> {
    FixedClock::at(2024, 3, 6, 14)
}

/// Build a notifier over the fakes with the default window and the given
/// ignore list.
pub fn notifier(
    source: &Arc<FakeIssueSource>,
    sink: &Arc<RecordingSink>,
    clock: &Arc<FixedClock>,
    ignored: &[u64],
) -> Notifier {
    let classifier = ChangeClassifier::new(
        ActiveWindow::default(),
        IgnoreFilter::new(ignored.iter().copied()),
    );
    Notifier::new(
        Arc::clone(source) as Arc<dyn IssueSource>,
        Arc::clone(sink) as Arc<dyn ChatSink>,
        classifier,
        NotificationFormatter::new(BASE_URL),
        NotifierConfig::default(),
    )
    .with_clock(Arc::clone(clock) as Arc<dyn Clock>)
}
