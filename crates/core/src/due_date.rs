//! Due-date policy for tasks.
//!
//! Due dates are day-precision: whatever the client sends is truncated to a
//! calendar day in the server's local time zone. A task created without a due
//! date is due [`DUE_DATE_DEFAULT_DAYS`] days after the day it was created.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::error::CoreError;

/// Days added to "today" when a task is created without a due date.
pub const DUE_DATE_DEFAULT_DAYS: u64 = 7;

/// Accepted formats for naive (zone-less) date-times, interpreted as local time.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// The default due date for a task created on `today`.
pub fn default_due_date(today: NaiveDate) -> NaiveDate {
    today + chrono::Days::new(DUE_DATE_DEFAULT_DAYS)
}

/// Parse a client-supplied due date and truncate it to a calendar day.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (converted to local time first)
/// and naive date-times (taken as local). Returns `None` for anything else.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).date_naive());
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(local_day_of)
}

/// Resolve the due date for a new task.
///
/// Blank or absent input yields the default; unparseable input is a
/// validation error because there is no existing value to fall back to.
pub fn resolve_create_due_date(raw: Option<&str>, today: NaiveDate) -> Result<NaiveDate, CoreError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default_due_date(today)),
        Some(value) => parse_due_date(value).ok_or_else(|| {
            CoreError::validation(format!("Due_Date '{value}' is not a valid date"))
        }),
    }
}

/// Resolve the due date for a partial update.
///
/// Unparseable input is ignored (`None`, leave unchanged) rather than
/// rejecting the rest of the update.
pub fn resolve_update_due_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(parse_due_date)
}

/// The first instant of `day` in server-local time, as sent to clients.
///
/// Browsers read a bare `YYYY-MM-DD` as UTC midnight, which is the previous
/// day west of Greenwich; a timestamp with the local offset is read back as
/// the intended day everywhere. Feeding the result to [`parse_due_date`]
/// yields `day` again. When midnight falls in a DST gap the first hour after
/// it is used.
pub fn local_midnight(day: NaiveDate) -> DateTime<FixedOffset> {
    let midnight = day.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            Local
                .from_local_datetime(&(midnight + chrono::Duration::hours(1)))
                .earliest()
        })
        .map(|dt| dt.fixed_offset())
        .unwrap_or_else(|| midnight.and_utc().fixed_offset())
}

/// Calendar day of a naive local date-time.
///
/// Ambiguous or skipped local times (DST transitions) still belong to the
/// same calendar day, so the naive date is used directly when the zone
/// cannot resolve them.
fn local_day_of(naive: NaiveDateTime) -> NaiveDate {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.date_naive())
        .unwrap_or_else(|| naive.date())
}
