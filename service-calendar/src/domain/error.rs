//! Calendar error types.
//!
//! Every variant is a broken precondition on the caller's side. None of them
//! are transient, so there is nothing to retry: fix the call site.

use chrono::NaiveDate;

use super::ServiceId;

/// Contract violations reported by calendar operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// A single-day edit targeted a date outside the record's range
    #[error("date {date} is outside calendar range {start}..={end}")]
    DateOutOfRange {
        date: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// A single-day edit on a record spanning more than one week
    #[error("calendar range {start}..={end} spans more than one week")]
    SpansMultipleWeeks { start: NaiveDate, end: NaiveDate },

    /// Week-based operation given a date that is not a Monday
    #[error("{0} is not a Monday")]
    NotMonday(NaiveDate),

    /// Sunday-based weekday index outside 0..=6
    #[error("invalid weekday index: {0}")]
    InvalidWeekdayIndex(u8),

    /// Operation combined records of two different services
    #[error("service mismatch: expected {expected}, found {found}")]
    ServiceMismatch { expected: ServiceId, found: ServiceId },
}
