//! Append-only event logs: production counts and downtime events

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};

/// Parts produced at a cell, recorded during a shift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionLog {
    pub id: String,
    pub cell_id: String,
    pub part_id: String,
    pub shift_id: Option<String>,
    pub recorded_at: DateTime<Utc>,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionDraft {
    pub cell_id: String,
    pub part_id: String,
    pub quantity: i64,
    /// Defaults to the time of the call
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Production totals for one cell on one UTC day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyProduction {
    pub date: NaiveDate,
    pub total_quantity: i64,
    pub entries: i64,
}

/// A stoppage recorded against a production run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DowntimeLog {
    pub id: String,
    pub run_id: String,
    pub reason: String,
    pub start_time: DateTime<Utc>,
    /// Not validated: zero and negative values are stored as given
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DowntimeDraft {
    pub run_id: String,
    pub reason: String,
    /// Echoed as given; the store keeps whole milliseconds, so a value with
    /// finer digits reads back truncated
    pub start_time: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl DowntimeLog {
    /// Echo the draft back under a freshly issued id
    pub fn from_draft(id: String, draft: DowntimeDraft) -> Self {
        Self {
            id,
            run_id: draft.run_id,
            reason: draft.reason,
            start_time: draft.start_time,
            duration_minutes: draft.duration_minutes,
        }
    }
}

static LAST_DOWNTIME_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Issue a `dt-<unix-millis>` id
///
/// The millisecond value is strictly increasing within the process: two calls
/// in the same millisecond get consecutive values instead of the same id.
pub fn next_downtime_id(now: DateTime<Utc>) -> String {
    let wanted = now.timestamp_millis();
    let mut last = LAST_DOWNTIME_MILLIS.load(Ordering::Relaxed);
    loop {
        let issued = wanted.max(last + 1);
        match LAST_DOWNTIME_MILLIS.compare_exchange_weak(
            last,
            issued,
            Ordering::AcqRel,
            Ordering::Relaxed,
        ) {
            Ok(_) => return format!("dt-{}", issued),
            Err(current) => last = current,
        }
    }
}
