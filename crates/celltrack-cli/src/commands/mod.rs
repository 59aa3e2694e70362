//! Subcommand implementations

pub mod admin;
pub mod analytics;
pub mod hierarchy;
pub mod logs;
pub mod shift;

use celltrack_core::errors::{ExError, TrackerError};
use celltrack_core::model::time::truncate_millis;
use celltrack_core::model::{CellRangeQuery, DateRange};
use celltrack_core::Envelope;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Print the envelope's wire form and report whether it succeeded
pub fn emit<T: Serialize>(envelope: &Envelope<T>) -> anyhow::Result<bool> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    Ok(envelope.is_success())
}

/// Parse `--from`/`--to`, or the envelope to print in place of a result
pub fn parse_range<T>(from: &str, to: &str) -> Result<DateRange, Envelope<T>> {
    DateRange::parse(from, to).map_err(|err| invalid(err, "Invalid date range"))
}

pub fn parse_cell_range<T>(cell: &str, from: &str, to: &str) -> Result<CellRangeQuery, Envelope<T>> {
    let range = parse_range(from, to)?;
    Ok(CellRangeQuery::new(cell, range.start, range.end))
}

/// RFC 3339 in any offset, normalised to UTC at the millisecond precision
/// the store keeps
pub fn parse_timestamp<T>(value: &str) -> Result<DateTime<Utc>, Envelope<T>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| truncate_millis(ts.with_timezone(&Utc)))
        .map_err(|_| {
            invalid(
                TrackerError::InvalidTimestamp {
                    value: value.to_string(),
                },
                "Invalid timestamp",
            )
        })
}

fn invalid<T>(err: TrackerError, message: &str) -> Envelope<T> {
    Envelope::from_error(&ExError::from(err), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_date_becomes_invalid_input() {
        let env = parse_range::<()>("2024-13-01", "2024-01-31").unwrap_err();
        assert_eq!(env.error_code(), Some("ERR_INVALID_INPUT"));
        assert_eq!(env.message(), "Invalid date range");
    }

    #[test]
    fn test_timestamp_accepts_offsets() {
        let ts = parse_timestamp::<()>("2024-01-05T12:00:00+02:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-05T10:00:00+00:00");
        assert!(parse_timestamp::<()>("yesterday").is_err());
    }

    #[test]
    fn test_timestamp_drops_sub_millisecond_digits() {
        let ts = parse_timestamp::<()>("2024-01-05T10:00:00.123456Z").unwrap();
        assert_eq!(ts.timestamp_millis() % 1000, 123);
        assert_eq!(ts.timestamp_subsec_nanos(), 123_000_000);
    }
}
