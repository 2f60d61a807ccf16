//! Active-hours filter.
//!
//! Notifications are only sent on configured weekdays and strictly
//! between two hours of local time. With the defaults that is Monday to
//! Friday, 09:00 through 19:59.

use chrono::{Datelike, Timelike, Weekday};

use crate::domain::models::ActiveWindowConfig;

/// Weekday and hour window during which notifications are emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveWindow {
    weekdays: Vec<Weekday>,
    /// First admitted hour, inclusive.
    start_hour: u32,
    /// First rejected hour after the window.
    end_hour: u32,
}

impl ActiveWindow {
    /// Create a window admitting hours strictly between `after_hour` and
    /// `before_hour` on the given weekdays.
    pub fn new(weekdays: Vec<Weekday>, after_hour: u32, before_hour: u32) -> Self {
        Self {
            weekdays,
            start_hour: after_hour.saturating_add(1),
            end_hour: before_hour,
        }
    }

    /// Window that admits every moment.
    pub fn always() -> Self {
        Self {
            weekdays: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ],
            start_hour: 0,
            end_hour: 24,
        }
    }

    /// Whether notifications should be emitted at `at`.
    pub fn is_active<T: Datelike + Timelike>(&self, at: &T) -> bool {
        let hour = at.hour();
        self.weekdays.contains(&at.weekday()) && hour >= self.start_hour && hour < self.end_hour
    }
}

impl Default for ActiveWindow {
    fn default() -> Self {
        Self::from(&ActiveWindowConfig::default())
    }
}

impl From<&ActiveWindowConfig> for ActiveWindow {
    fn from(config: &ActiveWindowConfig) -> Self {
        Self::new(config.weekdays.clone(), config.after_hour, config.before_hour)
    }
}
