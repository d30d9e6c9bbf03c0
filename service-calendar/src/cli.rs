//! Command-line front end.
//!
//! Describes one calendar record on the command line, runs one operation on
//! it, and renders the result as JSON.
//!
//! ```text
//! service-calendar <service-id> <start> <end> <days> <op> [date]
//! ```
//!
//! `<days>` is a Monday-first pattern such as `MTWTF--`. Dates are
//! `YYYY-MM-DD`.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Value, json, to_value};

use crate::config::{CalendarConfig, ConfigError};
use crate::domain::{
    CalendarError, InvalidServiceId, InvalidWeekdayMask, ServiceId, WeekdayMask, WeeklyCalendar,
};
use crate::service::ServiceCalendar;

pub const USAGE: &str = "usage: service-calendar <service-id> <start> <end> <days> <op> [date]
  <days>  Monday-first pattern, e.g. MTWTF--
  <op>    covers|status|add|subtract|mask-week|trim|apply-add|apply-remove";

/// Errors from parsing arguments or running the requested operation.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(&'static str),

    #[error("invalid date {arg:?}: {source}")]
    InvalidDate {
        arg: String,
        source: chrono::ParseError,
    },

    #[error(transparent)]
    ServiceId(#[from] InvalidServiceId),

    #[error(transparent)]
    Mask(#[from] InvalidWeekdayMask),

    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Calendar(_) => 1,
            _ => 2,
        }
    }
}

/// The operation to run on the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Covers(NaiveDate),
    Status(NaiveDate),
    Add(NaiveDate),
    Subtract(NaiveDate),
    MaskWeek(NaiveDate),
    Trim,
    /// Add through a [`ServiceCalendar`], tidied per [`CalendarConfig`].
    ApplyAdd(NaiveDate),
    /// Remove through a [`ServiceCalendar`], tidied per [`CalendarConfig`].
    ApplyRemove(NaiveDate),
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub calendar: WeeklyCalendar,
    pub operation: Operation,
}

/// Parse the arguments that follow the program name.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Invocation, CliError> {
    let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    let [id, start, end, days, op, rest @ ..] = args.as_slice() else {
        return Err(CliError::Usage("expected at least 5 arguments"));
    };

    let calendar = WeeklyCalendar::new(
        ServiceId::new(*id)?,
        parse_date(start)?,
        parse_date(end)?,
        WeekdayMask::parse(days)?,
    );

    let date = || match rest {
        [date] => parse_date(date),
        [] => Err(CliError::Usage("operation needs a date")),
        _ => Err(CliError::Usage("too many arguments")),
    };

    let operation = match *op {
        "covers" => Operation::Covers(date()?),
        "status" => Operation::Status(date()?),
        "add" => Operation::Add(date()?),
        "subtract" => Operation::Subtract(date()?),
        "mask-week" => Operation::MaskWeek(date()?),
        "apply-add" => Operation::ApplyAdd(date()?),
        "apply-remove" => Operation::ApplyRemove(date()?),
        "trim" if rest.is_empty() => Operation::Trim,
        "trim" => return Err(CliError::Usage("trim takes no date")),
        _ => return Err(CliError::Usage("unknown operation")),
    };

    Ok(Invocation {
        calendar,
        operation,
    })
}

fn parse_date(arg: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(arg, "%Y-%m-%d").map_err(|source| CliError::InvalidDate {
        arg: arg.to_string(),
        source,
    })
}

/// JSON body for a `mask-week` answer.
#[derive(Serialize)]
struct WeekMask {
    monday: NaiveDate,
    days: WeekdayMask,
    pattern: String,
}

/// Run the invocation and render its result.
pub fn run(invocation: Invocation, config: &CalendarConfig) -> Result<Value, CliError> {
    let Invocation {
        calendar,
        operation,
    } = invocation;

    let value = match operation {
        Operation::Covers(date) => json!({ "date": date, "covered": calendar.covers_date(date) }),
        Operation::Status(date) => json!({ "date": date, "status": calendar.status_for(date) }),
        Operation::Add(date) => to_value(calendar.add(date).as_slice())?,
        Operation::Subtract(date) => to_value(calendar.subtract(date).as_slice())?,
        Operation::MaskWeek(monday) => {
            let days = calendar.mask_for_week(monday)?;
            to_value(WeekMask {
                monday,
                days,
                pattern: days.to_string(),
            })?
        }
        Operation::Trim => to_value([calendar.trimmed()])?,
        Operation::ApplyAdd(date) | Operation::ApplyRemove(date) => {
            let id = calendar.service_id.clone();
            let mut service = ServiceCalendar::from_records(id, vec![calendar], config.clone())?;
            if matches!(operation, Operation::ApplyAdd(_)) {
                service.add_date(date);
            } else {
                service.remove_date(date);
            }
            to_value(service.records())?
        }
    };
    Ok(value)
}
