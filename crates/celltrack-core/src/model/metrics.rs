//! Derived per-cell, per-day records
//!
//! These rows are computed by a batch process outside this workspace. The
//! gateway only reads them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// OEE components for one cell on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyMetric {
    pub id: String,
    pub cell_id: String,
    pub date: NaiveDate,
    pub availability: f64,
    pub performance: f64,
    pub quality: f64,
    pub oee: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyDraft {
    pub cell_id: String,
    pub date: NaiveDate,
    pub availability: f64,
    pub performance: f64,
    pub quality: f64,
    /// Computed from the three components when absent
    #[serde(default)]
    pub oee: Option<f64>,
}

impl EfficiencyMetric {
    pub fn from_draft(id: String, draft: EfficiencyDraft) -> Self {
        let oee = draft
            .oee
            .unwrap_or(draft.availability * draft.performance * draft.quality);
        Self {
            id,
            cell_id: draft.cell_id,
            date: draft.date,
            availability: draft.availability,
            performance: draft.performance,
            quality: draft.quality,
            oee,
        }
    }
}

/// Averages over a cell's efficiency rows in a date range
///
/// All averages are `None` when no rows matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencySummary {
    pub cell_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub samples: i64,
    pub avg_availability: Option<f64>,
    pub avg_performance: Option<f64>,
    pub avg_quality: Option<f64>,
    pub avg_oee: Option<f64>,
}

/// Constraint/throughput figures for one cell on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BottleneckAnalysis {
    pub id: String,
    pub cell_id: String,
    pub date: NaiveDate,
    pub cycle_time_secs: f64,
    pub takt_time_secs: f64,
    pub throughput_per_hour: f64,
    pub utilization: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BottleneckDraft {
    pub cell_id: String,
    pub date: NaiveDate,
    pub cycle_time_secs: f64,
    pub takt_time_secs: f64,
    pub throughput_per_hour: f64,
    pub utilization: f64,
}

impl BottleneckAnalysis {
    pub fn from_draft(id: String, draft: BottleneckDraft) -> Self {
        Self {
            id,
            cell_id: draft.cell_id,
            date: draft.date,
            cycle_time_secs: draft.cycle_time_secs,
            takt_time_secs: draft.takt_time_secs,
            throughput_per_hour: draft.throughput_per_hour,
            utilization: draft.utilization,
        }
    }

    /// The cell cannot keep pace with demand on this day
    pub fn is_constraint(&self) -> bool {
        self.takt_time_secs > 0.0 && self.cycle_time_secs > self.takt_time_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    #[test]
    fn test_oee_defaults_to_product_of_components() {
        let metric = EfficiencyMetric::from_draft(
            "em-1".to_string(),
            EfficiencyDraft {
                cell_id: "cell-1".to_string(),
                date: day(),
                availability: 0.9,
                performance: 0.8,
                quality: 0.5,
                oee: None,
            },
        );
        assert!((metric.oee - 0.36).abs() < 1e-9);
    }

    #[test]
    fn test_supplied_oee_wins() {
        let metric = EfficiencyMetric::from_draft(
            "em-1".to_string(),
            EfficiencyDraft {
                cell_id: "cell-1".to_string(),
                date: day(),
                availability: 0.9,
                performance: 0.8,
                quality: 0.5,
                oee: Some(0.41),
            },
        );
        assert_eq!(metric.oee, 0.41);
    }

    #[test]
    fn test_constraint_detection() {
        let mut analysis = BottleneckAnalysis::from_draft(
            "ba-1".to_string(),
            BottleneckDraft {
                cell_id: "cell-1".to_string(),
                date: day(),
                cycle_time_secs: 62.0,
                takt_time_secs: 60.0,
                throughput_per_hour: 58.0,
                utilization: 0.97,
            },
        );
        assert!(analysis.is_constraint());

        analysis.cycle_time_secs = 55.0;
        assert!(!analysis.is_constraint());
    }
}
