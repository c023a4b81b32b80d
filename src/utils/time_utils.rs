use chrono::{DateTime, Local, Utc};

/// Placeholder for any value upstream did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Epoch seconds to a local date-time string, "N/A" if out of range.
pub fn epoch_secs_to_local(epoch_secs: i64) -> String {
    match DateTime::<Utc>::from_timestamp(epoch_secs, 0) {
        Some(dt) => dt.with_timezone(&Local).format(DATE_TIME_FORMAT).to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Epoch milliseconds to a local date-time string, "N/A" if out of range.
pub fn epoch_ms_to_local(epoch_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(epoch_ms) {
        Some(dt) => dt.with_timezone(&Local).format(DATE_TIME_FORMAT).to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Local calendar date for a plot axis tick. Fractional seconds are dropped.
pub fn epoch_secs_to_date(epoch_secs: f64) -> String {
    if !epoch_secs.is_finite() {
        return String::new();
    }
    match DateTime::<Utc>::from_timestamp(epoch_secs as i64, 0) {
        Some(dt) => dt.with_timezone(&Local).format(DATE_FORMAT).to_string(),
        None => String::new(),
    }
}

/// Optional epoch seconds, as shipped in `last_updated_at`.
pub fn format_last_updated(epoch_secs: Option<i64>) -> String {
    epoch_secs
        .map(epoch_secs_to_local)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
