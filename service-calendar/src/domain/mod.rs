//! Domain types for service calendars.
//!
//! A service's operating days are described by one or more [`WeeklyCalendar`]
//! records, each a date range plus the weekdays it runs on. The types here are
//! plain values; the operations that reshape records live in
//! [`crate::algebra`].

mod calendar;
mod day;
mod error;
mod exception;
mod service_id;
mod weekday_mask;

pub use calendar::WeeklyCalendar;
pub use day::{ServiceDay, first_day_of_week, last_day_of_week, weekday_from_index};
pub(crate) use day::{add_days, sub_days};
pub use error::CalendarError;
pub use exception::{ExceptionKind, ServiceException};
pub use service_id::{InvalidServiceId, ServiceId};
pub use weekday_mask::{InvalidWeekdayMask, WeekdayMask};
