//! Single-day insertion and removal.
//!
//! Both operations keep every other week of the record untouched. Removal cuts
//! the record at week boundaries so only the target week loses its bit;
//! insertion never widens a multi-week pattern and instead isolates the new
//! date as its own record.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, trace};

use super::Split;
use crate::domain::{
    CalendarError, ExceptionKind, ServiceDay, ServiceException, WeeklyCalendar, add_days,
    first_day_of_week, last_day_of_week, sub_days,
};

impl WeeklyCalendar {
    /// Records covering everything this one covers, plus `date`.
    ///
    /// - Already covered: returns this record unchanged.
    /// - Range stays within seven days once widened to `date`: a single record
    ///   with the date's weekday switched on. Days pulled into the range other
    ///   than `date` are switched off so nothing else becomes covered.
    /// - Otherwise: this record plus a single-day record for `date`.
    ///
    /// # Examples
    ///
    /// ```
    /// use service_calendar::domain::{ServiceId, WeeklyCalendar};
    /// use chrono::NaiveDate;
    ///
    /// let tue = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    /// let wed = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
    ///
    /// let cal = WeeklyCalendar::single_day(ServiceId::new("S").unwrap(), tue);
    /// let split = cal.add(wed);
    ///
    /// assert!(split.is_single());
    /// assert_eq!(split[0].end_date, wed);
    /// assert_eq!(split[0].days.to_string(), "-TW----");
    /// ```
    pub fn add(&self, date: impl ServiceDay) -> Split {
        let date = date.service_day();
        if self.covers_date(date) {
            trace!(service = %self.service_id, %date, "add: already covered");
            return Split::one(self.clone());
        }

        let start = self.start_date.min(date);
        let end = self.end_date.max(date);
        if (end - start).num_days() < 7 {
            let mut widened = self.clone();
            for day in start.iter_days().take_while(|d| *d <= end) {
                if !self.in_range(day) {
                    widened.days.set(day.weekday(), false);
                }
            }
            widened.days.set(date.weekday(), true);
            widened.start_date = start;
            widened.end_date = end;
            return Split::one(widened);
        }

        debug!(service = %self.service_id, %date, "add: isolating date in its own record");
        Split::from_pieces(vec![
            self.clone(),
            WeeklyCalendar::single_day(self.service_id.clone(), date),
        ])
    }

    /// Records covering everything this one covers, except `date`.
    ///
    /// The record is cut at the Monday-to-Sunday week containing `date`; only
    /// that week has the date's weekday switched off. Pieces are returned in
    /// chronological order and never overlap.
    pub fn subtract(&self, date: impl ServiceDay) -> Split {
        let date = date.service_day();
        if !self.covers_date(date) {
            trace!(service = %self.service_id, %date, "subtract: not covered");
            return Split::one(self.clone());
        }

        let first = first_day_of_week(date);
        let last = last_day_of_week(date);
        let weekday = date.weekday();

        let piece = |start: NaiveDate, end: NaiveDate, clear: bool| {
            let mut c = WeeklyCalendar::new(self.service_id.clone(), start, end, self.days);
            if clear {
                c.days.set(weekday, false);
            }
            c
        };

        let pieces = if first <= self.start_date && self.end_date <= last {
            vec![piece(self.start_date, self.end_date, true)]
        } else if first <= self.start_date {
            vec![
                piece(self.start_date, last, true),
                piece(add_days(last, 1), self.end_date, false),
            ]
        } else if last >= self.end_date {
            vec![
                piece(self.start_date, sub_days(first, 1), false),
                piece(first, self.end_date, true),
            ]
        } else {
            vec![
                piece(self.start_date, sub_days(first, 1), false),
                piece(first, last, true),
                piece(add_days(last, 1), self.end_date, false),
            ]
        };

        debug!(
            service = %self.service_id,
            %date,
            pieces = pieces.len(),
            "subtract: split calendar"
        );
        Split::from_pieces(pieces)
    }

    /// Apply a single-date exception: [`add`](Self::add) for
    /// [`ExceptionKind::Added`], [`subtract`](Self::subtract) for
    /// [`ExceptionKind::Removed`].
    pub fn add_or_subtract(&self, exception: &ServiceException) -> Result<Split, CalendarError> {
        if exception.service_id != self.service_id {
            return Err(CalendarError::ServiceMismatch {
                expected: self.service_id.clone(),
                found: exception.service_id.clone(),
            });
        }
        Ok(match exception.kind {
            ExceptionKind::Added => self.add(exception.date),
            ExceptionKind::Removed => self.subtract(exception.date),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ServiceId, WeekdayMask};

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn sid() -> ServiceId {
        ServiceId::new("S").unwrap()
    }

    fn cal(start: NaiveDate, end: NaiveDate, days: &str) -> WeeklyCalendar {
        WeeklyCalendar::new(sid(), start, end, WeekdayMask::parse(days).unwrap())
    }

    #[test]
    fn add_already_covered_is_identity() {
        let c = cal(d(1, 1), d(1, 31), "M-W-F--");
        let split = c.add(d(1, 3));
        assert_eq!(split.into_vec(), vec![c]);
    }

    #[test]
    fn add_adjacent_day_extends_single_day_record() {
        let c = WeeklyCalendar::single_day(sid(), d(3, 5));
        let split = c.add(d(3, 6));
        assert!(split.is_single());
        assert_eq!(split[0].start_date, d(3, 5));
        assert_eq!(split[0].end_date, d(3, 6));
        assert!(split[0].days.tuesday());
        assert!(split[0].days.wednesday());
        assert_eq!(split[0].days.count(), 2);
    }

    #[test]
    fn add_earlier_day_extends_backwards() {
        let c = WeeklyCalendar::single_day(sid(), d(3, 6));
        let split = c.add(d(3, 4));
        assert!(split.is_single());
        assert_eq!(split[0].start_date, d(3, 4));
        assert_eq!(split[0].end_date, d(3, 6));
        assert_eq!(split[0].days.to_string(), "M-W----");
    }

    #[test]
    fn add_inside_single_week_sets_bit() {
        let c = cal(d(1, 1), d(1, 7), "M------");
        let split = c.add(d(1, 5));
        assert!(split.is_single());
        assert_eq!(split[0].start_date, d(1, 1));
        assert_eq!(split[0].end_date, d(1, 7));
        assert_eq!(split[0].days.to_string(), "M---F--");
    }

    #[test]
    fn add_does_not_cover_gap_days() {
        // Stale Thursday bit on a Mon-Tue range must not start covering
        // Thursday once the range is widened to Friday.
        let c = cal(d(1, 1), d(1, 2), "MT-T---");
        let split = c.add(d(1, 5));
        assert!(split.is_single());
        let dates: Vec<_> = split[0].covered_dates().collect();
        assert_eq!(dates, vec![d(1, 1), d(1, 2), d(1, 5)]);
    }

    #[test]
    fn add_to_multi_week_record_isolates_date() {
        let c = cal(d(1, 1), d(1, 14), "M-W-F--");
        let split = c.add(d(1, 9));
        assert_eq!(split.len(), 2);
        assert_eq!(split[0], c);
        assert_eq!(split[1], WeeklyCalendar::single_day(sid(), d(1, 9)));
    }

    #[test]
    fn add_far_outside_range_isolates_date_in_order() {
        let c = cal(d(2, 1), d(2, 3), "MTWTFSS");
        let split = c.add(d(1, 1));
        assert_eq!(split.len(), 2);
        assert_eq!(split[0].start_date, d(1, 1));
        assert_eq!(split[1], c);
    }

    #[test]
    fn subtract_two_week_left_edge() {
        let c = cal(d(1, 1), d(1, 14), "M-W-F--");
        let split = c.subtract(d(1, 3));
        assert_eq!(split.len(), 2);

        assert_eq!(split[0].start_date, d(1, 1));
        assert_eq!(split[0].end_date, d(1, 7));
        assert_eq!(split[0].days.to_string(), "M---F--");

        assert_eq!(split[1].start_date, d(1, 8));
        assert_eq!(split[1].end_date, d(1, 14));
        assert_eq!(split[1].days.to_string(), "M-W-F--");

        assert!(split.iter().all(|c| c.service_id == sid()));
    }

    #[test]
    fn subtract_right_edge() {
        let c = cal(d(1, 1), d(1, 14), "M-W-F--");
        let split = c.subtract(d(1, 10));
        assert_eq!(split.len(), 2);
        assert_eq!(split[0], cal(d(1, 1), d(1, 7), "M-W-F--"));
        assert_eq!(split[1], cal(d(1, 8), d(1, 14), "M---F--"));
    }

    #[test]
    fn subtract_interior_week() {
        let c = cal(d(1, 1), d(1, 21), "MTWTF--");
        let split = c.subtract(d(1, 11));
        assert_eq!(split.len(), 3);
        assert_eq!(split[0], cal(d(1, 1), d(1, 7), "MTWTF--"));
        assert_eq!(split[1], cal(d(1, 8), d(1, 14), "MTW-F--"));
        assert_eq!(split[2], cal(d(1, 15), d(1, 21), "MTWTF--"));
    }

    #[test]
    fn subtract_within_single_week_clears_bit() {
        let c = cal(d(1, 2), d(1, 5), "MTWTF--");
        let split = c.subtract(d(1, 3));
        assert!(split.is_single());
        assert_eq!(split[0], cal(d(1, 2), d(1, 5), "MT-TF--"));
    }

    #[test]
    fn subtract_partial_weeks_at_both_ends() {
        // Wednesday 2024-01-03 to Wednesday 2024-01-17, remove Friday 12th
        let c = cal(d(1, 3), d(1, 17), "MTWTFSS");
        let split = c.subtract(d(1, 12));
        assert_eq!(split.len(), 3);
        assert_eq!(split[0].end_date, d(1, 7));
        assert_eq!(split[1].start_date, d(1, 8));
        assert_eq!(split[1].end_date, d(1, 14));
        assert_eq!(split[2].start_date, d(1, 15));
        assert_eq!(split[2].end_date, d(1, 17));
    }

    #[test]
    fn subtract_uncovered_is_identity() {
        let c = cal(d(1, 1), d(1, 14), "M-W-F--");
        assert_eq!(c.subtract(d(1, 2)).into_vec(), vec![c.clone()]);
        assert_eq!(c.subtract(d(2, 5)).into_vec(), vec![c]);
    }

    fn assert_removed_only(c: &WeeklyCalendar, date: NaiveDate) {
        let split = c.subtract(date);
        assert!(split.iter().all(|p| !p.covers_date(date)));
        for other in c.covered_dates().filter(|&o| o != date) {
            let hits = split.iter().filter(|p| p.covers_date(other)).count();
            assert_eq!(hits, 1, "{other} covered {hits} times");
        }
    }

    #[test]
    fn subtract_at_start_of_date_range() {
        let end = add_days(NaiveDate::MIN, 2);
        let c = WeeklyCalendar::new(sid(), NaiveDate::MIN, end, WeekdayMask::ALL);
        assert_removed_only(&c, NaiveDate::MIN);
        assert_removed_only(&c, end);
    }

    #[test]
    fn subtract_at_end_of_date_range() {
        let start = sub_days(NaiveDate::MAX, 2);
        let c = WeeklyCalendar::new(sid(), start, NaiveDate::MAX, WeekdayMask::ALL);
        assert_removed_only(&c, NaiveDate::MAX);
        assert_removed_only(&c, start);
    }

    #[test]
    fn add_or_subtract_dispatches_on_kind() {
        let c = cal(d(1, 1), d(1, 14), "M-W-F--");

        let removed = c
            .add_or_subtract(&ServiceException::removed(sid(), d(1, 3)))
            .unwrap();
        assert_eq!(removed, c.subtract(d(1, 3)));

        let added = c
            .add_or_subtract(&ServiceException::added(sid(), d(1, 4)))
            .unwrap();
        assert_eq!(added, c.add(d(1, 4)));
    }

    #[test]
    fn add_or_subtract_rejects_other_service() {
        let c = cal(d(1, 1), d(1, 14), "M-W-F--");
        let other = ServiceId::new("OTHER").unwrap();
        let err = c
            .add_or_subtract(&ServiceException::added(other, d(1, 4)))
            .unwrap_err();
        assert!(matches!(err, CalendarError::ServiceMismatch { .. }));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{ServiceId, WeekdayMask};
    use proptest::prelude::*;

    fn base() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    /// Calendars of up to ~5 weeks starting somewhere in the first two weeks
    /// of 2024, plus a probe date around them.
    fn calendar_and_date() -> impl Strategy<Value = (WeeklyCalendar, NaiveDate)> {
        (0u64..14, 0u64..35, 0u8..128, 0u64..63).prop_map(|(offset, len, bits, probe)| {
            let start = add_days(base(), offset);
            let cal = WeeklyCalendar::new(
                ServiceId::new("P").unwrap(),
                start,
                add_days(start, len),
                WeekdayMask::from_bits(bits).unwrap(),
            );
            (cal, add_days(base(), probe))
        })
    }

    fn window() -> impl Iterator<Item = NaiveDate> {
        sub_days(base(), 7).iter_days().take(80)
    }

    proptest! {
        /// After adding a date, some returned record covers it
        #[test]
        fn add_is_effective((cal, date) in calendar_and_date()) {
            let split = cal.add(date);
            prop_assert!(split.iter().any(|c| c.covers_date(date)));
        }

        /// Adding covers exactly the original dates plus the new one
        #[test]
        fn add_preserves_other_coverage((cal, date) in calendar_and_date()) {
            let split = cal.add(date);
            for day in window() {
                let expected = cal.covers_date(day) || day == date;
                let actual = split.iter().any(|c| c.covers_date(day));
                prop_assert_eq!(actual, expected, "day {}", day);
            }
        }

        /// Removing a date leaves every other covered date covered exactly once
        #[test]
        fn subtract_is_exact((cal, date) in calendar_and_date()) {
            let split = cal.subtract(date);
            prop_assert!(split.iter().all(|c| !c.covers_date(date)));
            for day in window().filter(|&d| d != date) {
                let count = split.iter().filter(|c| c.covers_date(day)).count();
                let expected = usize::from(cal.covers_date(day));
                prop_assert_eq!(count, expected, "day {}", day);
            }
        }

        /// Pieces are chronological, contiguous and keep the service id
        #[test]
        fn subtract_pieces_tile_the_range((cal, date) in calendar_and_date()) {
            let split = cal.subtract(date);
            prop_assert_eq!(split[0].start_date, cal.start_date);
            prop_assert_eq!(split[split.len() - 1].end_date, cal.end_date);
            for pair in split.windows(2) {
                prop_assert_eq!(add_days(pair[0].end_date, 1), pair[1].start_date);
            }
            prop_assert!(split.iter().all(|c| c.service_id == cal.service_id));
        }

        /// Subtracting an uncovered date returns the record unchanged
        #[test]
        fn subtract_uncovered_identity((cal, date) in calendar_and_date()) {
            if !cal.covers_date(date) {
                prop_assert_eq!(cal.subtract(date).into_vec(), vec![cal]);
            }
        }

        /// Adding a covered date returns the record unchanged
        #[test]
        fn add_covered_identity((cal, date) in calendar_and_date()) {
            if cal.covers_date(date) {
                prop_assert_eq!(cal.add(date).into_vec(), vec![cal]);
            }
        }
    }
}
