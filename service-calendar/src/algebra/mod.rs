//! Calendar algebra.
//!
//! Operations that reshape [`WeeklyCalendar`](crate::domain::WeeklyCalendar)
//! records: adding or removing single dates, trimming ranges, per-week masks,
//! merging, and filters over collections of records.
//!
//! Edits that can change range boundaries return a [`Split`] of new records;
//! the input record is never modified. Trimming and bit setters mutate in
//! place.

mod edit;
mod merge;
mod query;
mod split;
mod trim;
mod week;

pub use query::{services_for_date, services_for_day_of_week};
pub use split::Split;
