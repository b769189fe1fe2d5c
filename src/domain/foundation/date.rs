//! Calendar date value object.
//!
//! Membership periods are whole calendar dates; time of day never enters
//! the domain. Month arithmetic follows the clamping policy: the day of
//! month is preserved where it exists in the target month, otherwise the
//! result is the last day of the target month (Jan 31 + 1 month = Feb 29
//! in a leap year, Feb 28 otherwise).

use chrono::{Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Immutable calendar date, no timezone or time-of-day component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalDate(NaiveDate);

impl LocalDate {
    /// Today's date in UTC.
    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }

    /// Creates a date from year, month, day.
    ///
    /// Returns `None` for out-of-range components (e.g. Feb 30).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Creates a date from a NaiveDate.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the inner NaiveDate.
    pub fn as_naive(&self) -> &NaiveDate {
        &self.0
    }

    /// Adds whole calendar months, clamping to the last valid day of the
    /// target month.
    pub fn add_months(&self, months: u32) -> Self {
        // NaiveDate::checked_add_months only fails past year 262143
        Self(
            self.0
                .checked_add_months(Months::new(months))
                .unwrap_or(NaiveDate::MAX),
        )
    }

    /// Adds whole days.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + chrono::Duration::days(days))
    }

    /// Checks if this date is strictly before another.
    pub fn is_before(&self, other: &LocalDate) -> bool {
        self.0 < other.0
    }

    /// Checks if this date is strictly after another.
    pub fn is_after(&self, other: &LocalDate) -> bool {
        self.0 > other.0
    }

    /// Signed number of days from `other` to `self`.
    pub fn days_since(&self, other: &LocalDate) -> i64 {
        (self.0 - other.0).num_days()
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Calendar month, 1-12.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of month, 1-31.
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl std::fmt::Display for LocalDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
