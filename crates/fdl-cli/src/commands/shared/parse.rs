use std::str::FromStr;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use fdl_core::errors::CoreError;
use fdl_core::feedback::parse_timestamp;

/// Parse one of the closed sets (type, category, severity, level).
pub fn parse_closed<T>(raw: &str) -> anyhow::Result<T>
where
    T: FromStr<Err = CoreError>,
{
    raw.parse::<T>().map_err(anyhow::Error::from)
}

/// Which end of a date window a bound closes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Bound {
    Start,
    End,
}

/// Parse a window bound. A bare date covers the whole day on either end.
pub fn parse_bound(raw: &str, field: &str, bound: Bound) -> anyhow::Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let time = match bound {
            Bound::Start => date.and_hms_opt(0, 0, 0),
            Bound::End => date.and_hms_nano_opt(23, 59, 59, 999_999_999),
        };
        return time
            .map(|t| t.and_utc())
            .with_context(|| format!("invalid {field} '{raw}'"));
    }
    parse_timestamp(raw).with_context(|| {
        format!("invalid {field} '{raw}': expected YYYY-MM-DD or an RFC 3339 timestamp")
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use fdl_core::enums::{Category, Severity};

    use super::{Bound, parse_bound, parse_closed};

    #[test]
    fn parses_closed_set_case_insensitively() {
        let category: Category = parse_closed("api").expect("category should parse");
        assert_eq!(category, Category::Api);
        let severity: Severity = parse_closed("HIGH").expect("severity should parse");
        assert_eq!(severity, Severity::High);
    }

    #[test]
    fn errors_on_unknown_closed_value() {
        let err = parse_closed::<Severity>("critical").expect_err("should fail");
        assert!(err.to_string().contains("critical"));
    }

    #[test]
    fn bare_dates_cover_the_whole_day() {
        let start = parse_bound("2026-02-01", "since", Bound::Start).unwrap();
        let end = parse_bound("2026-02-01", "until", Bound::End).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap());
        assert!(end > Utc.with_ymd_and_hms(2026, 2, 1, 23, 59, 59).unwrap());
        assert!(end < Utc.with_ymd_and_hms(2026, 2, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn full_timestamps_are_accepted() {
        let at = parse_bound("2026-02-01T10:30:00Z", "since", Bound::Start).unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2026, 2, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn garbage_bound_names_the_field() {
        let err = parse_bound("yesterday", "until", Bound::End).expect_err("should fail");
        assert!(err.to_string().contains("invalid until 'yesterday'"));
    }
}
