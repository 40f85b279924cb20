//! Session date/time parsing
//!
//! Times without an offset are taken as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Combine the `date` and optional `time` fields of a session request
/// into one instant. Returns `None` when the result is not a valid instant.
pub fn parse_session_instant(date: &str, time: Option<&str>) -> Option<DateTime<Utc>> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }

    match time.map(str::trim).filter(|t| !t.is_empty()) {
        Some(time) => parse_naive(&format!("{}T{}", date, time)),
        None => DateTime::parse_from_rfc3339(date)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| parse_naive(date))
            .or_else(|| {
                NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|naive| naive.and_utc())
            }),
    }
}

fn parse_naive(value: &str) -> Option<DateTime<Utc>> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_and_time_combine() {
        let combined = parse_session_instant("2025-06-01", Some("18:00")).unwrap();
        assert_eq!(Some(combined), parse_session_instant("2025-06-01T18:00", None));
        assert_eq!(combined, Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap());
    }

    #[test]
    fn test_time_with_seconds() {
        assert_eq!(
            parse_session_instant("2025-06-01", Some("18:00:30")),
            Some(Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 30).unwrap())
        );
    }

    #[test]
    fn test_date_only_forms() {
        assert_eq!(
            parse_session_instant("2025-06-01", None),
            Some(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_session_instant("2025-06-01T18:00:00+02:00", Some("  ")),
            Some(Utc.with_ymd_and_hms(2025, 6, 1, 16, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(parse_session_instant("", Some("18:00")), None);
        assert_eq!(parse_session_instant("tomorrow", None), None);
        assert_eq!(parse_session_instant("2025-02-30", Some("10:00")), None);
        assert_eq!(parse_session_instant("2025-06-01", Some("25:00")), None);
    }
}
