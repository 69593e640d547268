//! Date handling for values the service stores as ISO strings.

use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, TimeZone};

const ISO_DATE: &str = "%Y-%m-%d";

/// Reads `YYYY-MM-DD` or a full RFC 3339 timestamp as a calendar date.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, ISO_DATE)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// `YYYY-MM-DD` form of a service date, or the input unchanged when it is
/// not a date.
pub fn to_iso_date(value: &str) -> String {
    parse_calendar_date(value)
        .map(|date| date.format(ISO_DATE).to_string())
        .unwrap_or_else(|| value.to_string())
}

const EN_IN_SHORT: &str = "%-d/%-m/%Y";

/// en-IN short date (`d/m/yyyy`) of a calendar date such as a date of birth,
/// or the input unchanged when it is not a date. No zone shift is applied.
pub fn localized(value: &str) -> String {
    parse_calendar_date(value)
        .map(|date| date.format(EN_IN_SHORT).to_string())
        .unwrap_or_else(|| value.to_string())
}

/// en-IN short date of a service timestamp, taken in the machine's local
/// zone.
pub fn localized_timestamp(value: &str) -> String {
    localized_timestamp_in(value, &Local)
}

/// en-IN short date of a service timestamp as seen in `zone`. Plain dates
/// fall back to [`localized`].
pub fn localized_timestamp_in<Tz>(value: &str, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::parse_from_rfc3339(value.trim()) {
        Ok(instant) => instant.with_timezone(zone).format(EN_IN_SHORT).to_string(),
        Err(_) => localized(value),
    }
}
