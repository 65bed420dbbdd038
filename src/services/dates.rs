use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Naive forms, read as UTC. `%.f` also matches when there is no fraction.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 timestamp as sent by the web client.
///
/// Accepts RFC 3339 (`Z` or numeric offset), naive date-times (taken as UTC)
/// and bare dates (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rfc3339_with_offset() {
        let expected = Utc.with_ymd_and_hms(2026, 10, 20, 6, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2026-10-20T06:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2026-10-20T08:00:00+02:00"), Some(expected));
    }

    #[test]
    fn test_naive_forms_are_utc() {
        let expected = Utc.with_ymd_and_hms(2026, 10, 20, 8, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2026-10-20T08:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-10-20T08:30"), Some(expected));
        assert_eq!(parse_timestamp("2026-10-20 08:30:00"), Some(expected));
        assert_eq!(parse_timestamp(" 2026-10-20T08:30:00.000 "), Some(expected));
    }

    #[test]
    fn test_bare_date_is_midnight() {
        assert_eq!(
            parse_timestamp("2026-10-20"),
            Some(Utc.with_ymd_and_hms(2026, 10, 20, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("tomorrow"), None);
        assert_eq!(parse_timestamp("2026-13-01"), None);
        assert_eq!(parse_timestamp("20/10/2026"), None);
    }
}
