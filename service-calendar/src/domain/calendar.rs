//! Weekly-recurring calendar record.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::day::{ServiceDay, add_days};
use super::{CalendarError, ServiceId, WeekdayMask};

/// A service that runs on a fixed set of weekdays within an inclusive date range.
///
/// `start_date <= end_date` is assumed by every operation but not enforced;
/// callers must not build a reversed range.
///
/// # Examples
///
/// ```
/// use service_calendar::domain::{ServiceId, WeekdayMask, WeeklyCalendar};
/// use chrono::NaiveDate;
///
/// let cal = WeeklyCalendar::new(
///     ServiceId::new("WK").unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
///     WeekdayMask::WEEKDAYS,
/// );
///
/// // Wednesday inside the range
/// assert!(cal.covers_date(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()));
/// // Saturday inside the range: definitely not running
/// assert_eq!(cal.status_for(NaiveDate::from_ymd_opt(2024, 1, 6).unwrap()), Some(false));
/// // Outside the range: this record has no say
/// assert_eq!(cal.status_for(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()), None);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeeklyCalendar {
    pub service_id: ServiceId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: WeekdayMask,
}

impl WeeklyCalendar {
    /// Create a calendar record.
    pub fn new(
        service_id: ServiceId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        days: WeekdayMask,
    ) -> Self {
        Self {
            service_id,
            start_date,
            end_date,
            days,
        }
    }

    /// A record covering exactly one date.
    pub fn single_day(service_id: ServiceId, date: impl ServiceDay) -> Self {
        let date = date.service_day();
        Self::new(service_id, date, date, WeekdayMask::single(date.weekday()))
    }

    /// Whether `date` falls within `start_date..=end_date`, ignoring weekdays.
    pub fn in_range(&self, date: impl ServiceDay) -> bool {
        let date = date.service_day();
        self.start_date <= date && date <= self.end_date
    }

    /// Whether the service runs on `date` according to this record.
    pub fn covers_date(&self, date: impl ServiceDay) -> bool {
        self.status_for(date).unwrap_or(false)
    }

    /// The service status on `date`, or `None` if the date is outside the range.
    ///
    /// `Some(false)` means the service definitely does not run; `None` means this
    /// record has no authority over the date.
    pub fn status_for(&self, date: impl ServiceDay) -> Option<bool> {
        let date = date.service_day();
        if self.in_range(date) {
            Some(self.days.contains(date.weekday()))
        } else {
            None
        }
    }

    /// Whether `day` is active in the weekly pattern. No range check.
    pub fn contains_day(&self, day: Weekday) -> bool {
        self.days.contains(day)
    }

    /// Turn a weekday on or off in the weekly pattern.
    pub fn set_day(&mut self, day: Weekday, active: bool) {
        self.days.set(day, active);
    }

    /// Turn the service on or off for `date`.
    ///
    /// Only valid on records spanning at most one week, where each weekday
    /// occurs once and toggling its bit affects exactly `date`.
    pub fn set(&mut self, date: impl ServiceDay, active: bool) -> Result<(), CalendarError> {
        let date = date.service_day();
        if !self.in_range(date) {
            warn!(service = %self.service_id, %date, "set outside calendar range");
            return Err(CalendarError::DateOutOfRange {
                date,
                start: self.start_date,
                end: self.end_date,
            });
        }
        if self.span_days() > 7 {
            warn!(service = %self.service_id, %date, "set on multi-week calendar");
            return Err(CalendarError::SpansMultipleWeeks {
                start: self.start_date,
                end: self.end_date,
            });
        }
        self.days.set(date.weekday(), active);
        Ok(())
    }

    /// Number of days in the range, inclusive. Zero for a reversed range.
    pub fn span_days(&self) -> u64 {
        let days = (self.end_date - self.start_date).num_days() + 1;
        u64::try_from(days).unwrap_or(0)
    }

    /// Every date this record covers, in order.
    pub fn covered_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(|d| *d <= self.end_date)
            .filter(|d| self.days.contains(d.weekday()))
    }

    /// True if the record covers no date at all.
    pub fn is_empty(&self) -> bool {
        if self.days.is_empty() || self.start_date > self.end_date {
            return true;
        }
        // The first seven days hit every weekday the range reaches.
        let horizon = add_days(self.start_date, 6).min(self.end_date);
        !self
            .start_date
            .iter_days()
            .take_while(|d| *d <= horizon)
            .any(|d| self.days.contains(d.weekday()))
    }
}

impl fmt::Debug for WeeklyCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WeeklyCalendar({} {}..={} {})",
            self.service_id, self.start_date, self.end_date, self.days
        )
    }
}
