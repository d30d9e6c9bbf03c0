//! Range trimming.
//!
//! After bits are switched off, a record's boundaries can sit on days it no
//! longer runs. Trimming pulls them in to the nearest active day without
//! changing which dates are covered.

use chrono::Datelike;

use crate::domain::{WeeklyCalendar, add_days, sub_days};

impl WeeklyCalendar {
    /// Advance `start_date` to the first active weekday.
    ///
    /// No-op when no weekday is active. Never moves past `end_date`.
    pub fn trim_start_date(&mut self) {
        if self.days.is_empty() {
            return;
        }
        while self.start_date < self.end_date && !self.days.contains(self.start_date.weekday()) {
            self.start_date = add_days(self.start_date, 1);
        }
    }

    /// Pull `end_date` back to the last active weekday.
    ///
    /// No-op when no weekday is active. Never moves before `start_date`.
    pub fn trim_end_date(&mut self) {
        if self.days.is_empty() {
            return;
        }
        while self.end_date > self.start_date && !self.days.contains(self.end_date.weekday()) {
            self.end_date = sub_days(self.end_date, 1);
        }
    }

    /// Trim both ends of the range.
    pub fn trim_dates(&mut self) {
        self.trim_start_date();
        self.trim_end_date();
    }

    /// Returns a trimmed copy.
    pub fn trimmed(mut self) -> Self {
        self.trim_dates();
        self
    }
}
