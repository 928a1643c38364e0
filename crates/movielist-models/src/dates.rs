use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse a date the way the API hands them out.
///
/// Accepts RFC 3339, RFC 2822 / HTTP-date (`Tue, 18 Jun 2024 10:00:00 GMT`,
/// which is what the server's JSON encoder emits), a naive ISO timestamp and a
/// bare `YYYY-MM-DD`. Returns `None` for anything else so that an odd date never
/// fails the surrounding record.
pub fn parse_api_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Milliseconds since the epoch, as Mongo extended JSON encodes `$date`.
pub fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}
