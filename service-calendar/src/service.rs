//! The full set of calendar records for one service.
//!
//! The algebra works on one record at a time. `ServiceCalendar` keeps a whole
//! service's records together and routes date edits to the records they
//! affect, tidying the results according to [`CalendarConfig`].

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::config::CalendarConfig;
use crate::domain::{
    CalendarError, ExceptionKind, ServiceDay, ServiceException, ServiceId, WeeklyCalendar,
};

/// All records describing one service, ordered by start date.
///
/// # Examples
///
/// ```
/// use service_calendar::config::CalendarConfig;
/// use service_calendar::domain::{ServiceId, WeekdayMask, WeeklyCalendar};
/// use service_calendar::service::ServiceCalendar;
/// use chrono::NaiveDate;
///
/// let id = ServiceId::new("WK").unwrap();
/// let jan = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
/// let record = WeeklyCalendar::new(id.clone(), jan(1), jan(31), WeekdayMask::WEEKDAYS);
///
/// let mut service = ServiceCalendar::from_records(id, vec![record], CalendarConfig::default())
///     .unwrap();
/// service.remove_date(jan(17));
/// service.add_date(jan(20));
///
/// assert!(!service.runs_on(jan(17)));
/// assert!(service.runs_on(jan(18)));
/// assert!(service.runs_on(jan(20)));
/// assert!(!service.runs_on(jan(21)));
/// ```
#[derive(Debug, Clone)]
pub struct ServiceCalendar {
    service_id: ServiceId,
    records: Vec<WeeklyCalendar>,
    config: CalendarConfig,
}

impl ServiceCalendar {
    /// A service with no operating days yet.
    pub fn new(service_id: ServiceId, config: CalendarConfig) -> Self {
        Self {
            service_id,
            records: Vec::new(),
            config,
        }
    }

    /// A service built from existing records.
    ///
    /// Every record must belong to `service_id`.
    pub fn from_records(
        service_id: ServiceId,
        records: Vec<WeeklyCalendar>,
        config: CalendarConfig,
    ) -> Result<Self, CalendarError> {
        if let Some(stray) = records.iter().find(|r| r.service_id != service_id) {
            return Err(CalendarError::ServiceMismatch {
                expected: service_id,
                found: stray.service_id.clone(),
            });
        }
        let mut service = Self {
            service_id,
            records,
            config,
        };
        service.sort();
        Ok(service)
    }

    pub fn service_id(&self) -> &ServiceId {
        &self.service_id
    }

    pub fn records(&self) -> &[WeeklyCalendar] {
        &self.records
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub fn into_records(self) -> Vec<WeeklyCalendar> {
        self.records
    }

    /// Whether any record runs the service on `date`.
    pub fn runs_on(&self, date: impl ServiceDay) -> bool {
        let date = date.service_day();
        self.records.iter().any(|r| r.covers_date(date))
    }

    /// `Some(true)` if any record runs on `date`, `Some(false)` if some record
    /// has the date in range but none run, `None` if no record reaches it.
    pub fn status_for(&self, date: impl ServiceDay) -> Option<bool> {
        let date = date.service_day();
        self.records
            .iter()
            .filter_map(|r| r.status_for(date))
            .reduce(|a, b| a || b)
    }

    /// Make the service run on `date`.
    pub fn add_date(&mut self, date: impl ServiceDay) {
        let date = date.service_day();
        if self.runs_on(date) {
            trace!(service = %self.service_id, %date, "add_date: already running");
            return;
        }

        // A record that absorbs the date without splitting.
        for i in 0..self.records.len() {
            if let [widened] = self.records[i].add(date).as_slice() {
                self.records[i] = widened.clone();
                self.tidy();
                return;
            }
        }

        let single = WeeklyCalendar::single_day(self.service_id.clone(), date);
        if self.config.merge_additions && self.merge_in(&single) {
            self.tidy();
            return;
        }

        debug!(service = %self.service_id, %date, "add_date: new single-day record");
        self.records.push(single);
        self.tidy();
    }

    /// Stop the service running on `date`.
    pub fn remove_date(&mut self, date: impl ServiceDay) {
        let date = date.service_day();
        let before = self.records.len();
        let records = std::mem::take(&mut self.records);
        self.records = records
            .into_iter()
            .flat_map(|r| r.subtract(date))
            .collect();
        debug!(
            service = %self.service_id,
            %date,
            before,
            after = self.records.len(),
            "remove_date"
        );
        self.tidy();
    }

    /// Apply a single-date exception for this service.
    pub fn apply(&mut self, exception: &ServiceException) -> Result<(), CalendarError> {
        if exception.service_id != self.service_id {
            return Err(CalendarError::ServiceMismatch {
                expected: self.service_id.clone(),
                found: exception.service_id.clone(),
            });
        }
        match exception.kind {
            ExceptionKind::Added => self.add_date(exception.date),
            ExceptionKind::Removed => self.remove_date(exception.date),
        }
        Ok(())
    }

    /// Every date the service runs on within `from..=to`.
    pub fn dates_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        from.iter_days()
            .take_while(|d| *d <= to)
            .filter(|d| self.runs_on(*d))
            .collect()
    }

    /// Replace the first record that can absorb `single`. Returns whether one did.
    fn merge_in(&mut self, single: &WeeklyCalendar) -> bool {
        for record in self.records.iter_mut() {
            // Records in this set always share the service id.
            if let Ok(Some(merged)) = record.try_merge(single) {
                *record = merged;
                return true;
            }
        }
        false
    }

    fn tidy(&mut self) {
        if self.config.trim_pieces {
            for record in &mut self.records {
                record.trim_dates();
            }
        }
        if self.config.drop_empty {
            self.records.retain(|r| !r.is_empty());
        }
        self.sort();
    }

    fn sort(&mut self) {
        self.records.sort_by_key(|r| r.start_date);
    }
}
