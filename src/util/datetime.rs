//! Date/time parsing and display in Colombia local time.
//!
//! The backend stores timestamps either as RFC 3339 (`2024-02-15T13:00:00.000Z`)
//! or as MySQL datetimes without an offset; both are accepted here. Naive
//! values are read as local time.

#[cfg(test)]
#[path = "datetime_test.rs"]
mod datetime_test;

use time::format_description::well_known::Rfc3339;
use time::macros::{format_description, offset};
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::error::ValidationError;

/// Colombia does not observe daylight saving time.
pub const LOCAL_OFFSET: UtcOffset = offset!(-5);

/// Parse a `YYYY-MM-DD` form date.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] when the input is not a calendar date.
pub fn parse_date(raw: &str) -> Result<Date, ValidationError> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| ValidationError::InvalidDate(raw.to_owned()))
}

/// Parse a backend timestamp. Returns `None` for anything unrecognised.
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(dt);
    }
    let mysql = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    if let Ok(dt) = PrimitiveDateTime::parse(raw, mysql) {
        return Some(dt.assume_offset(LOCAL_OFFSET));
    }
    let naive_iso = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    if let Ok(dt) = PrimitiveDateTime::parse(raw, naive_iso) {
        return Some(dt.assume_offset(LOCAL_OFFSET));
    }
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_offset(LOCAL_OFFSET))
}

/// Local wall-clock instant on `date` at `hour:minute`.
pub fn at_local(date: Date, hour: u8, minute: u8) -> Option<OffsetDateTime> {
    let time = Time::from_hms(hour, minute, 0).ok()?;
    Some(PrimitiveDateTime::new(date, time).assume_offset(LOCAL_OFFSET))
}

/// UTC timestamp with millisecond precision and a `Z` suffix.
pub fn to_iso_utc(dt: OffsetDateTime) -> String {
    dt.to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        ))
        .unwrap_or_default()
}

pub fn iso_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]")).unwrap_or_default()
}

/// Local `HH:MM`.
pub fn format_hm(dt: OffsetDateTime) -> String {
    dt.to_offset(LOCAL_OFFSET)
        .format(format_description!("[hour]:[minute]"))
        .unwrap_or_default()
}

/// `d/m/yyyy`, the way Colombian Spanish prints short dates.
pub fn format_date_es(date: Date) -> String {
    date.format(format_description!("[day padding:none]/[month padding:none]/[year]"))
        .unwrap_or_default()
}

pub fn local_date(dt: OffsetDateTime) -> Date {
    dt.to_offset(LOCAL_OFFSET).date()
}

/// `"Xh Ym"`; negative spans print as zero.
pub fn format_duration(span: Duration) -> String {
    let minutes = span.whole_minutes().max(0);
    format!("{}h {}m", minutes / 60, minutes % 60)
}

pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

pub fn today_local() -> Date {
    local_date(now())
}

pub fn unix_millis(dt: OffsetDateTime) -> i64 {
    i64::try_from(dt.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX)
}
