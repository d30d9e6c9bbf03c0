//! Day-granularity date handling.
//!
//! Calendars only care about which day a service runs, never the time of day.
//! Everything that queries a calendar goes through [`ServiceDay`] so callers can
//! pass timestamps and have the time component discarded consistently.

use chrono::{Datelike, DateTime, Days, NaiveDate, NaiveDateTime, TimeZone, Weekday};

use super::CalendarError;

/// A value that identifies a single service day.
pub trait ServiceDay {
    /// The calendar date, with any time of day discarded.
    fn service_day(&self) -> NaiveDate;
}

impl ServiceDay for NaiveDate {
    fn service_day(&self) -> NaiveDate {
        *self
    }
}

impl ServiceDay for NaiveDateTime {
    fn service_day(&self) -> NaiveDate {
        self.date()
    }
}

/// Uses the local date in the timestamp's own offset.
impl<Tz: TimeZone> ServiceDay for DateTime<Tz> {
    fn service_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

impl<T: ServiceDay + ?Sized> ServiceDay for &T {
    fn service_day(&self) -> NaiveDate {
        (**self).service_day()
    }
}

/// The Monday of the week containing `date`.
///
/// Weeks always run Monday to Sunday, regardless of locale. A week cut off by
/// the start of the representable range begins at [`NaiveDate::MIN`].
///
/// # Examples
///
/// ```
/// use service_calendar::domain::first_day_of_week;
/// use chrono::NaiveDate;
///
/// let wed = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
/// assert_eq!(first_day_of_week(wed), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
/// ```
pub fn first_day_of_week(date: NaiveDate) -> NaiveDate {
    sub_days(date, u64::from(date.weekday().num_days_from_monday()))
}

/// The Sunday of the week containing `date`, or [`NaiveDate::MAX`] when the
/// week runs past the end of the representable range.
pub fn last_day_of_week(date: NaiveDate) -> NaiveDate {
    add_days(date, u64::from(6 - date.weekday().num_days_from_monday()))
}

/// Map a Sunday-based index (0 = Sunday, 6 = Saturday) to a weekday.
///
/// This is the numbering used by the packed bits of a
/// [`WeekdayMask`](super::WeekdayMask).
pub fn weekday_from_index(index: u8) -> Result<Weekday, CalendarError> {
    match index {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        _ => Err(CalendarError::InvalidWeekdayIndex(index)),
    }
}

/// `date` plus `n` days, saturating at the end of the representable range.
pub(crate) fn add_days(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_add_days(Days::new(n)).unwrap_or(NaiveDate::MAX)
}

/// `date` minus `n` days, saturating at the start of the representable range.
pub(crate) fn sub_days(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveTime};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn week_bounds_monday_to_sunday() {
        // 2024-01-01 is a Monday
        for day in 1..=7 {
            assert_eq!(first_day_of_week(d(2024, 1, day)), d(2024, 1, 1));
            assert_eq!(last_day_of_week(d(2024, 1, day)), d(2024, 1, 7));
        }
        assert_eq!(first_day_of_week(d(2024, 1, 8)), d(2024, 1, 8));
    }

    #[test]
    fn week_bounds_cross_year() {
        // 2025-12-31 is a Wednesday
        assert_eq!(first_day_of_week(d(2025, 12, 31)), d(2025, 12, 29));
        assert_eq!(last_day_of_week(d(2025, 12, 31)), d(2026, 1, 4));
    }

    #[test]
    fn week_bounds_clamp_at_range_ends() {
        assert_eq!(first_day_of_week(NaiveDate::MIN), NaiveDate::MIN);
        assert_eq!(last_day_of_week(NaiveDate::MIN).weekday(), Weekday::Sun);

        assert_eq!(last_day_of_week(NaiveDate::MAX), NaiveDate::MAX);
        assert_eq!(first_day_of_week(NaiveDate::MAX).weekday(), Weekday::Mon);
    }

    #[test]
    fn weekday_index_is_sunday_based() {
        assert_eq!(weekday_from_index(0).unwrap(), Weekday::Sun);
        assert_eq!(weekday_from_index(1).unwrap(), Weekday::Mon);
        assert_eq!(weekday_from_index(6).unwrap(), Weekday::Sat);
        for i in 0..7u8 {
            let day = weekday_from_index(i).unwrap();
            assert_eq!(day.num_days_from_sunday(), u32::from(i));
        }
    }

    #[test]
    fn weekday_index_out_of_range() {
        assert!(matches!(
            weekday_from_index(7),
            Err(CalendarError::InvalidWeekdayIndex(7))
        ));
    }

    #[test]
    fn time_of_day_is_discarded() {
        let date = d(2024, 3, 5);
        let late = date.and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap());
        assert_eq!(late.service_day(), date);

        let offset = FixedOffset::east_opt(3600).unwrap();
        let stamped = offset.from_local_datetime(&late).unwrap();
        assert_eq!(stamped.service_day(), date);
    }

    #[test]
    fn day_arithmetic_saturates() {
        assert_eq!(add_days(NaiveDate::MAX, 1), NaiveDate::MAX);
        assert_eq!(sub_days(NaiveDate::MIN, 1), NaiveDate::MIN);
        assert_eq!(add_days(d(2024, 2, 28), 2), d(2024, 3, 1));
    }
}
