//! Timestamp helpers
//!
//! Timestamps are persisted as unix milliseconds, so every timestamp the
//! domain creates is truncated to millisecond precision up front. A row read
//! back from the store then compares equal to the value that was written.

use chrono::{DateTime, Utc};

/// Current time, truncated to whole milliseconds
pub fn now_millis() -> DateTime<Utc> {
    truncate_millis(Utc::now())
}

/// Drop sub-millisecond precision
pub fn truncate_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    from_millis(ts.timestamp_millis())
}

/// Decode a persisted unix-millisecond value
///
/// Out-of-range values clamp to the unix epoch.
pub fn from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}
