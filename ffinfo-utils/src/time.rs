use std::time::{SystemTime, UNIX_EPOCH};

use chrono::DateTime;

/// Return the current unix timestamp in milliseconds.
pub fn now_unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

/// Render a unix timestamp as `YYYY-MM-DD HH:MM:SS` (UTC), or `Unknown` for
/// missing, non-positive or out-of-range values.
pub fn format_unix_timestamp(timestamp: Option<i64>) -> String {
    timestamp
        .filter(|secs| *secs > 0)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|datetime| datetime.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "Unknown".to_owned())
}
