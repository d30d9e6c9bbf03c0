//! Per-week view of a calendar.

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::warn;

use crate::domain::{CalendarError, WeekdayMask, WeeklyCalendar};

impl WeeklyCalendar {
    /// The weekdays this record actually runs in the week starting `monday`.
    ///
    /// Days of that week outside `start_date..=end_date` are always off, even
    /// when the weekly pattern has them on.
    ///
    /// # Examples
    ///
    /// ```
    /// use service_calendar::domain::{ServiceId, WeekdayMask, WeeklyCalendar};
    /// use chrono::NaiveDate;
    ///
    /// let cal = WeeklyCalendar::new(
    ///     ServiceId::new("S").unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
    ///     WeekdayMask::ALL,
    /// );
    /// let monday = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
    /// assert_eq!(cal.mask_for_week(monday).unwrap().to_string(), "MTW----");
    /// ```
    pub fn mask_for_week(&self, monday: NaiveDate) -> Result<WeekdayMask, CalendarError> {
        if monday.weekday() != Weekday::Mon {
            warn!(service = %self.service_id, date = %monday, "mask_for_week needs a Monday");
            return Err(CalendarError::NotMonday(monday));
        }

        let mut mask = WeekdayMask::NONE;
        for date in monday.iter_days().take(7) {
            if self.covers_date(date) {
                mask.set(date.weekday(), true);
            }
        }
        Ok(mask)
    }
}
