//! Parsing of date and date-time values submitted by clients

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

use crate::error::{AppError, AppResult};

/// Local date-time layouts accepted without an offset. `%.f` also matches
/// an absent fractional part.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Layouts carrying an explicit UTC offset but no seconds
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M%:z"];

/// Calendar years accepted from clients. Anything outside is refused before
/// date arithmetic or storage can overflow.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

/// Parse an ISO 8601 date (`2024-01-01`, taken as midnight) or date-time.
///
/// Values without an offset are interpreted as UTC.
pub fn parse_datetime(input: &str) -> AppResult<DateTime<Utc>> {
    parse_any(input.trim())
        .filter(|dt| YEAR_RANGE.contains(&dt.year()))
        .ok_or_else(|| AppError::InvalidDate("Invalid date format.".to_string()))
}

fn parse_any(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}
