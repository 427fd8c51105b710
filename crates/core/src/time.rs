//! Timestamp normalization shared by every temporal comparison in agentlens.
//!
//! The monitor backend emits ISO-8601-like strings that sometimes lack an
//! explicit UTC/offset marker (SQLite `datetime()` output uses a space
//! separator and no zone). Bare timestamps are always interpreted as UTC;
//! absent or unparseable timestamps resolve to epoch zero so that ordering
//! and gap math never fail.

use chrono::{DateTime, NaiveDateTime, Utc};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];

/// Parse a backend timestamp, treating missing offsets as UTC.
pub fn parse_timestamp(raw: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return DateTime::<Utc>::UNIX_EPOCH;
    };
    let normalized = raw.replace(' ', "T");

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return dt.with_timezone(&Utc);
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return naive.and_utc();
        }
    }
    DateTime::<Utc>::UNIX_EPOCH
}

/// Epoch milliseconds of a backend timestamp (0 for absent/unparseable).
pub fn timestamp_ms(raw: Option<&str>) -> i64 {
    parse_timestamp(raw).timestamp_millis()
}
