//! Field normalizers: pure text-to-value transforms applied to input rows
//! before they are stored.

pub mod email;
pub mod employees;
pub mod revenue;

pub use email::synthesize_email;
pub use employees::{parse_employee_range, EmployeeRange};
pub use revenue::parse_revenue;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::warn;

const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"];

/// Parse a calendar date, dropping any time-of-day or offset.
pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();

    let parsed = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()));

    if parsed.is_none() {
        warn!(input = %raw, "Unrecognized date format; storing no date");
    }
    parsed
}

/// Parse a whole-number column that spreadsheet exports sometimes render as `1998.0`.
pub fn parse_integer(field: &'static str, raw: Option<&str>) -> Option<i32> {
    let raw = raw?.trim();
    let parsed = raw.parse::<i32>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.fract() == 0.0 && *v >= i32::MIN as f64 && *v <= i32::MAX as f64)
            .map(|v| v as i32)
    });

    if parsed.is_none() {
        warn!(field, input = %raw, "Not an integer; storing no value");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 7);
        assert_eq!(parse_date(Some("2024-03-07")), expected);
        assert_eq!(parse_date(Some("03/07/2024")), expected);
        assert_eq!(parse_date(Some("7 March 2024")), expected);
        assert_eq!(parse_date(Some("March 7, 2024")), expected);
        assert_eq!(parse_date(Some("Mar 7, 2024")), expected);
        assert_eq!(parse_date(Some("2024-03-07 18:30:00")), expected);
        assert_eq!(parse_date(Some("2024-03-07T23:30:00-05:00")), expected);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date(Some("next spring")), None);
        assert_eq!(parse_date(None), None);
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("year", Some("1998")), Some(1998));
        assert_eq!(parse_integer("year", Some("1998.0")), Some(1998));
        assert_eq!(parse_integer("year", Some("1998.5")), None);
        assert_eq!(parse_integer("year", Some("unknown")), None);
        assert_eq!(parse_integer("year", None), None);
    }
}
