/// Server-assigned numeric identifiers.
pub type DbId = i64;

/// All parsed timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Parse a server timestamp leniently.
///
/// Accepts RFC 3339 (`2023-06-12T10:00:00Z`), zone-less date-times
/// (`2023-06-12T10:00:00`, optional fractional seconds, read as UTC) and
/// bare dates (`2023-06-12`, midnight UTC). Returns `None` for anything
/// else.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&chrono::Utc));
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
