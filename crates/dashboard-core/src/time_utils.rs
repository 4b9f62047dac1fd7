use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime};

use crate::error::{DashboardError, Result};

/// Date-time layouts accepted in the source file, tried in order after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts accepted in the source file.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse a calendar date or date-time string into a [`NaiveDateTime`].
///
/// Accepts RFC 3339 (the offset is dropped, the wall-clock time is kept),
/// `YYYY-MM-DD HH:MM:SS[.f]`, the `T`-separated variant, and the date-only
/// forms `YYYY-MM-DD` / `YYYY/MM/DD`, which resolve to midnight.
///
/// Returns `None` for empty strings or unrecognised formats.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Parse a user-supplied `YYYY-MM-DD` date (CLI filter bounds).
pub fn parse_date_arg(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| DashboardError::InvalidDate(s.to_string()))
}

// ── Month arithmetic ──────────────────────────────────────────────────────────

/// First day of the month containing `ts`.
pub fn month_start(ts: NaiveDateTime) -> NaiveDate {
    let date = ts.date();
    // Day 1 always exists for a month that already contains `date`.
    date.with_day(1).unwrap_or(date)
}

/// Move `date` by `delta` calendar months, clamping the day to the end of the
/// target month (Jan 31 + 1 month = Feb 28/29).
///
/// Returns `date` unchanged when the result would fall outside chrono's range.
pub fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.unwrap_or(date)
}

/// Format a month bucket as `"YYYY-MM"`.
pub fn format_month(month: NaiveDate) -> String {
    month.format("%Y-%m").to_string()
}

/// Short month label for chart axes, e.g. `"Jan 24"`.
pub fn short_month_label(month: NaiveDate) -> String {
    month.format("%b %y").to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── parse_datetime ────────────────────────────────────────────────────────

    #[test]
    fn test_parse_date_only() {
        let dt = parse_datetime("2024-01-05").unwrap();
        assert_eq!(dt, date(2024, 1, 5).and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_slash_date() {
        let dt = parse_datetime("2024/02/29").unwrap();
        assert_eq!(dt.date(), date(2024, 2, 29));
    }

    #[test]
    fn test_parse_space_separated_datetime() {
        let dt = parse_datetime("2022-07-09 14:30:00").unwrap();
        assert_eq!(dt, date(2022, 7, 9).and_hms_opt(14, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let dt = parse_datetime("2022-07-09T14:30:00.250").unwrap();
        assert_eq!(dt.date(), date(2022, 7, 9));
    }

    #[test]
    fn test_parse_rfc3339_keeps_wall_clock() {
        let dt = parse_datetime("2024-03-31T23:15:00+07:00").unwrap();
        assert_eq!(dt.date(), date(2024, 3, 31));
        assert_eq!(dt.format("%H:%M").to_string(), "23:15");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert!(parse_datetime("  2024-01-05  ").is_some());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_datetime("").is_none());
        assert!(parse_datetime("yesterday").is_none());
        assert!(parse_datetime("2024-13-01").is_none());
        assert!(parse_datetime("2023-02-29").is_none());
    }

    // ── parse_date_arg ────────────────────────────────────────────────────────

    #[test]
    fn test_parse_date_arg_ok() {
        assert_eq!(parse_date_arg("2024-06-30").unwrap(), date(2024, 6, 30));
    }

    #[test]
    fn test_parse_date_arg_err() {
        let err = parse_date_arg("30/06/2024").unwrap_err();
        assert!(matches!(err, DashboardError::InvalidDate(_)));
    }

    // ── month helpers ─────────────────────────────────────────────────────────

    #[test]
    fn test_month_start() {
        let ts = date(2024, 1, 20).and_hms_opt(18, 5, 0).unwrap();
        assert_eq!(month_start(ts), date(2024, 1, 1));
    }

    #[test]
    fn test_month_start_first_day_is_stable() {
        let ts = date(2024, 2, 1).and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(month_start(ts), date(2024, 2, 1));
    }

    #[test]
    fn test_shift_months_forward_clamps_day() {
        assert_eq!(shift_months(date(2024, 1, 31), 1), date(2024, 2, 29));
    }

    #[test]
    fn test_shift_months_backward() {
        assert_eq!(shift_months(date(2024, 3, 15), -2), date(2024, 1, 15));
        assert_eq!(shift_months(date(2024, 1, 15), -1), date(2023, 12, 15));
    }

    #[test]
    fn test_format_month() {
        assert_eq!(format_month(date(2024, 2, 1)), "2024-02");
        assert_eq!(short_month_label(date(2024, 2, 1)), "Feb 24");
    }
}
