//! Filters over collections of calendar records.
//!
//! Both filters are lazy and keep the input order.

use chrono::{NaiveDate, Weekday};

use crate::domain::{ServiceDay, WeeklyCalendar};

/// Records whose weekly pattern includes `day`.
///
/// With `date`, only records whose range contains that date are kept. The
/// date's own weekday is not checked against `day`.
pub fn services_for_day_of_week<'a, I>(
    calendars: I,
    day: Weekday,
    date: Option<NaiveDate>,
) -> impl Iterator<Item = &'a WeeklyCalendar>
where
    I: IntoIterator<Item = &'a WeeklyCalendar>,
{
    calendars
        .into_iter()
        .filter(move |c| c.contains_day(day) && date.is_none_or(|d| c.in_range(d)))
}

/// Records that run on `date`.
///
/// # Examples
///
/// ```
/// use service_calendar::algebra::services_for_date;
/// use service_calendar::domain::{ServiceId, WeekdayMask, WeeklyCalendar};
/// use chrono::NaiveDate;
///
/// let jan = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
/// let weekdays = WeeklyCalendar::new(
///     ServiceId::new("WK").unwrap(), jan(1), jan(31), WeekdayMask::WEEKDAYS,
/// );
/// let weekends = WeeklyCalendar::new(
///     ServiceId::new("WE").unwrap(), jan(1), jan(31), WeekdayMask::WEEKEND,
/// );
/// let all = [weekdays, weekends];
///
/// let saturday: Vec<_> = services_for_date(&all, jan(6)).collect();
/// assert_eq!(saturday.len(), 1);
/// assert_eq!(saturday[0].service_id.as_str(), "WE");
/// ```
pub fn services_for_date<'a, I>(
    calendars: I,
    date: impl ServiceDay,
) -> impl Iterator<Item = &'a WeeklyCalendar>
where
    I: IntoIterator<Item = &'a WeeklyCalendar>,
{
    let date = date.service_day();
    calendars.into_iter().filter(move |c| c.covers_date(date))
}
