//! Inclusive calendar-date ranges
//!
//! Both ends are inclusive. Against `date` columns that means
//! `start <= date <= end`; against timestamp columns the range covers
//! `[start 00:00 UTC, end + 1 day 00:00 UTC)`.

use chrono::{Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::TrackerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range. `start > end` is allowed and simply matches nothing.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse `YYYY-MM-DD` bounds
    pub fn parse(start: &str, end: &str) -> Result<Self, TrackerError> {
        Ok(Self::new(parse_date(start)?, parse_date(end)?))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Inclusive lower bound for timestamp columns, in unix millis
    pub fn start_millis(&self) -> i64 {
        self.start
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp_millis()
    }

    /// Exclusive upper bound for timestamp columns, in unix millis
    pub fn end_exclusive_millis(&self) -> i64 {
        match self.end.checked_add_days(Days::new(1)) {
            Some(next) => next.and_time(NaiveTime::MIN).and_utc().timestamp_millis(),
            None => i64::MAX,
        }
    }
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(value: &str) -> Result<NaiveDate, TrackerError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| TrackerError::InvalidDate {
        value: value.to_string(),
    })
}

/// The `{cellId, startDate, endDate}` filter shared by the per-cell analytics queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRangeQuery {
    pub cell_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl CellRangeQuery {
    pub fn new(cell_id: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            cell_id: cell_id.into(),
            start_date,
            end_date,
        }
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
        assert!(range.contains(d("2024-01-01")));
        assert!(range.contains(d("2024-01-31")));
        assert!(!range.contains(d("2023-12-31")));
        assert!(!range.contains(d("2024-02-01")));
    }

    #[test]
    fn test_timestamp_bounds_cover_whole_end_day() {
        let range = DateRange::parse("2024-01-05", "2024-01-05").unwrap();
        assert_eq!(
            range.end_exclusive_millis() - range.start_millis(),
            24 * 60 * 60 * 1000
        );
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let range = DateRange::parse("2024-02-01", "2024-01-01").unwrap();
        assert!(range.is_empty());
        assert!(!range.contains(d("2024-01-15")));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = DateRange::parse("2024-13-01", "2024-01-01").unwrap_err();
        assert_eq!(
            err,
            TrackerError::InvalidDate {
                value: "2024-13-01".to_string()
            }
        );
    }

    proptest! {
        #[test]
        fn prop_contains_agrees_with_millis_bounds(
            start in 0i64..2000,
            len in 0i64..400,
            sample in 0i64..2400,
        ) {
            let epoch = d("2020-01-01");
            let start_date = epoch + chrono::Duration::days(start);
            let end_date = start_date + chrono::Duration::days(len);
            let sample_date = epoch + chrono::Duration::days(sample);
            let range = DateRange::new(start_date, end_date);

            let noon = sample_date
                .and_hms_opt(12, 0, 0)
                .unwrap()
                .and_utc()
                .timestamp_millis();
            let by_millis = range.start_millis() <= noon && noon < range.end_exclusive_millis();
            prop_assert_eq!(range.contains(sample_date), by_millis);
        }
    }
}
