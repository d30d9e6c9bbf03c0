//! Ordered result of a calendar edit.

use std::ops::Deref;

use crate::domain::WeeklyCalendar;

/// The records produced by editing one calendar, in chronological order.
///
/// Always holds at least one record. Records are ordered by start date; when
/// two start on the same day the one produced first comes first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split(Vec<WeeklyCalendar>);

impl Split {
    /// A split holding a single record.
    pub fn one(calendar: WeeklyCalendar) -> Self {
        Split(vec![calendar])
    }

    /// Build a split from pieces in any order.
    pub(crate) fn from_pieces(mut pieces: Vec<WeeklyCalendar>) -> Self {
        debug_assert!(!pieces.is_empty());
        pieces.sort_by_key(|c| c.start_date);
        Split(pieces)
    }

    /// True if the edit did not need to split the record.
    pub fn is_single(&self) -> bool {
        self.0.len() == 1
    }

    pub fn as_slice(&self) -> &[WeeklyCalendar] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<WeeklyCalendar> {
        self.0
    }
}

impl Deref for Split {
    type Target = [WeeklyCalendar];

    fn deref(&self) -> &[WeeklyCalendar] {
        &self.0
    }
}

impl IntoIterator for Split {
    type Item = WeeklyCalendar;
    type IntoIter = std::vec::IntoIter<WeeklyCalendar>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Split {
    type Item = &'a WeeklyCalendar;
    type IntoIter = std::slice::Iter<'a, WeeklyCalendar>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
