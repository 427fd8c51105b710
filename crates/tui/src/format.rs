use agentlens_core::time::parse_timestamp;
use chrono::{DateTime, Utc};

/// Compact duration for burst rows: "340ms", "2.1s", "3m 12s".
pub fn format_duration_ms(ms: i64) -> String {
    if ms < 1_000 {
        format!("{ms}ms")
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        let total_secs = ms / 1000;
        format!("{}m {}s", total_secs / 60, total_secs % 60)
    }
}

/// Relative age of a raw wire timestamp against an explicit `now`.
///
/// `now` is a parameter rather than read from the clock so rendering is
/// deterministic and testable. Unparseable or missing stamps render as "-".
pub fn relative_time(raw: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(raw) = raw else {
        return "-".to_string();
    };
    let parsed = parse_timestamp(Some(raw));
    if parsed == DateTime::<Utc>::UNIX_EPOCH {
        return "-".to_string();
    }

    let secs = (now - parsed).num_seconds();
    if secs < 0 {
        return "now".to_string();
    }
    if secs < 60 {
        format!("{secs}s ago")
    } else if secs < 3_600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3_600)
    } else {
        format!("{}d ago", secs / 86_400)
    }
}

/// Wall-clock time of day for timeline rows, "-" when absent.
pub fn clock_time(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "-".to_string();
    };
    let parsed = parse_timestamp(Some(raw));
    if parsed == DateTime::<Utc>::UNIX_EPOCH {
        return "-".to_string();
    }
    parsed.format("%H:%M:%S").to_string()
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
