use chrono::{DateTime, Datelike, SecondsFormat, Utc};

/// Extracts the calendar year from a creation timestamp.
///
/// Only the first four characters are inspected, so any ISO 8601 form
/// (`2024-03-01`, `2024-03-01T10:00:00Z`, ...) works. Returns `None` when the
/// prefix is not a number.
pub fn year_of(timestamp: &str) -> Option<i32> {
    let prefix = timestamp.get(0..4)?;
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

/// Current UTC calendar year.
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Formats an instant the way note dates are stored (`2024-05-01T12:30:00.000Z`).
pub fn to_note_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
