//! Single-date service exceptions.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ServiceId;

/// Whether an exception adds or removes the service on its date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionKind {
    Added,
    Removed,
}

/// A one-off change to a service on a specific date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceException {
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub kind: ExceptionKind,
}

impl ServiceException {
    pub fn added(service_id: ServiceId, date: NaiveDate) -> Self {
        Self {
            service_id,
            date,
            kind: ExceptionKind::Added,
        }
    }

    pub fn removed(service_id: ServiceId, date: NaiveDate) -> Self {
        Self {
            service_id,
            date,
            kind: ExceptionKind::Removed,
        }
    }
}

impl fmt::Display for ServiceException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.kind {
            ExceptionKind::Added => '+',
            ExceptionKind::Removed => '-',
        };
        write!(f, "{}{sign}{}", self.service_id, self.date)
    }
}
