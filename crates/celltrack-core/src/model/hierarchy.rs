//! Plant hierarchy: Company → Site → Value Stream → Cell → Machine, plus Parts
//!
//! Each entity comes with a `*Draft` (caller-supplied attributes for create)
//! and a `*Patch` (fields to overwrite on update; `None` leaves a field as is).
//! Nullable columns patch through `Option<Option<_>>`: `Some(None)` clears
//! the column, and on the wire an explicit `null` means the same.
//! Neither is validated here: column constraints in the store are the only
//! gate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::attributes::Attributes;

/// A field that appears in the payload is `Some`, even when its value is `null`
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Top of the hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDraft {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPatch {
    pub name: Option<String>,
}

impl Company {
    pub fn from_draft(id: String, draft: CompanyDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: CompanyPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        self.updated_at = now;
    }
}

/// A plant belonging to a company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    pub name: String,
    pub company_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDraft {
    pub name: String,
    pub company_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitePatch {
    pub name: Option<String>,
    pub company_id: Option<String>,
}

impl Site {
    pub fn from_draft(id: String, draft: SiteDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            company_id: draft.company_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: SitePatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(company_id) = patch.company_id {
            self.company_id = company_id;
        }
        self.updated_at = now;
    }
}

/// End-to-end production flow within a site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueStream {
    pub id: String,
    pub name: String,
    pub site_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueStreamDraft {
    pub name: String,
    pub site_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueStreamPatch {
    pub name: Option<String>,
    pub site_id: Option<String>,
}

impl ValueStream {
    pub fn from_draft(id: String, draft: ValueStreamDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            site_id: draft.site_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: ValueStreamPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(site_id) = patch.site_id {
            self.site_id = site_id;
        }
        self.updated_at = now;
    }
}

/// Production work unit; the scope of every efficiency and bottleneck metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub value_stream_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub value_stream_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellPatch {
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    pub value_stream_id: Option<String>,
}

impl Cell {
    pub fn from_draft(id: String, draft: CellDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            value_stream_id: draft.value_stream_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: CellPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(value_stream_id) = patch.value_stream_id {
            self.value_stream_id = value_stream_id;
        }
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    pub id: String,
    pub name: String,
    pub cell_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineDraft {
    pub name: String,
    pub cell_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachinePatch {
    pub name: Option<String>,
    pub cell_id: Option<String>,
}

impl Machine {
    pub fn from_draft(id: String, draft: MachineDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            cell_id: draft.cell_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: MachinePatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(cell_id) = patch.cell_id {
            self.cell_id = cell_id;
        }
        self.updated_at = now;
    }
}

/// A part number tracked by production logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: String,
    pub name: String,
    pub number: Option<String>,
    pub ideal_cycle_time_secs: Option<f64>,
    pub attributes: Attributes,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartDraft {
    pub name: String,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub ideal_cycle_time_secs: Option<f64>,
    #[serde(default)]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartPatch {
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub number: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub ideal_cycle_time_secs: Option<Option<f64>>,
    /// Replaces the whole attribute map when present
    pub attributes: Option<Attributes>,
}

impl Part {
    pub fn from_draft(id: String, draft: PartDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            number: draft.number,
            ideal_cycle_time_secs: draft.ideal_cycle_time_secs,
            attributes: draft.attributes,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: PartPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(number) = patch.number {
            self.number = number;
        }
        if let Some(secs) = patch.ideal_cycle_time_secs {
            self.ideal_cycle_time_secs = secs;
        }
        if let Some(attributes) = patch.attributes {
            self.attributes = attributes;
        }
        self.updated_at = now;
    }

    /// Ideal output per hour derived from the ideal cycle time
    pub fn ideal_rate_per_hour(&self) -> Option<f64> {
        self.ideal_cycle_time_secs
            .filter(|secs| *secs > 0.0)
            .map(|secs| 3600.0 / secs)
    }
}
