//! Combining two records into one.

use tracing::trace;

use crate::domain::{CalendarError, WeeklyCalendar, add_days};

impl WeeklyCalendar {
    /// A single record covering exactly the dates covered by `self` or `other`.
    ///
    /// Returns `Ok(None)` when no single record can represent the union. The
    /// shapes recognised are:
    ///
    /// - either record covering nothing;
    /// - one record containing the other (range and weekdays);
    /// - identical weekly patterns over touching or overlapping ranges;
    /// - a combined range of at most seven days, where the patterns can be
    ///   united without covering anything new.
    pub fn try_merge(&self, other: &WeeklyCalendar) -> Result<Option<WeeklyCalendar>, CalendarError> {
        if self.service_id != other.service_id {
            return Err(CalendarError::ServiceMismatch {
                expected: self.service_id.clone(),
                found: other.service_id.clone(),
            });
        }

        if other.is_empty() {
            return Ok(Some(self.clone()));
        }
        if self.is_empty() {
            return Ok(Some(other.clone()));
        }
        if self.contains(other) {
            return Ok(Some(self.clone()));
        }
        if other.contains(self) {
            return Ok(Some(other.clone()));
        }

        let start = self.start_date.min(other.start_date);
        let end = self.end_date.max(other.end_date);

        if self.days == other.days
            && self.start_date <= add_days(other.end_date, 1)
            && other.start_date <= add_days(self.end_date, 1)
        {
            return Ok(Some(WeeklyCalendar::new(
                self.service_id.clone(),
                start,
                end,
                self.days,
            )));
        }

        if (end - start).num_days() < 7 {
            let candidate =
                WeeklyCalendar::new(self.service_id.clone(), start, end, self.days | other.days);
            let exact = candidate
                .covered_dates()
                .all(|d| self.covers_date(d) || other.covers_date(d));
            if exact {
                return Ok(Some(candidate));
            }
        }

        trace!(service = %self.service_id, "try_merge: no single record fits");
        Ok(None)
    }

    /// Whether every date `other` covers is implied by this record's range and
    /// pattern.
    fn contains(&self, other: &WeeklyCalendar) -> bool {
        self.start_date <= other.start_date
            && other.end_date <= self.end_date
            && (self.days | other.days) == self.days
    }
}
