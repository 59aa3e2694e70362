//! Table mapping for the plant hierarchy
//!
//! `Record` ties a domain type to its table: which columns it owns, how to
//! decode a row and how to bind its values. The generic CRUD functions in
//! `repo::hierarchy` are written once against this trait.

use celltrack_core::errors::{ExError, TrackerError};
use celltrack_core::model::time::from_millis;
use celltrack_core::model::{
    Attributes, Cell, CellDraft, CellPatch, Company, CompanyDraft, CompanyPatch, EntityKind,
    Machine, MachineDraft, MachinePatch, Part, PartDraft, PartPatch, Site, SiteDraft, SitePatch,
    ValueStream, ValueStreamDraft, ValueStreamPatch,
};
use chrono::{DateTime, Utc};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, Sqlite};

/// A bindable query against the SQLite driver
pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// A hierarchy entity backed by one table keyed on `id`
pub trait Record: Sized + Send + Sync + Unpin + 'static {
    const KIND: EntityKind;

    /// Every column except `id`, in bind order
    const COLUMNS: &'static [&'static str];

    /// Caller-supplied attributes for create
    type Draft: Send;

    /// Fields to overwrite on update
    type Patch: Send;

    fn id(&self) -> &str;

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error>;

    fn from_draft(id: String, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    fn apply(&mut self, patch: Self::Patch, now: DateTime<Utc>);

    /// Bind the values of `COLUMNS`, in order
    ///
    /// # Errors
    /// Fails when a column value cannot be encoded for storage.
    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, ExError>;
}

/// A record that belongs to a parent in the hierarchy
pub trait ChildRecord: Record {
    /// Foreign-key column naming the parent
    const PARENT_COLUMN: &'static str;

    fn parent_id(&self) -> &str;
}

fn timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    Ok(from_millis(row.try_get::<i64, _>(column)?))
}

impl Record for Company {
    const KIND: EntityKind = EntityKind::Company;
    const COLUMNS: &'static [&'static str] = &["name", "created_at", "updated_at"];
    type Draft = CompanyDraft;
    type Patch = CompanyPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }

    fn from_draft(id: String, draft: CompanyDraft, now: DateTime<Utc>) -> Self {
        Company::from_draft(id, draft, now)
    }

    fn apply(&mut self, patch: CompanyPatch, now: DateTime<Utc>) {
        Company::apply(self, patch, now)
    }

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, ExError> {
        Ok(query
            .bind(self.name.clone())
            .bind(self.created_at.timestamp_millis())
            .bind(self.updated_at.timestamp_millis()))
    }
}

impl Record for Site {
    const KIND: EntityKind = EntityKind::Site;
    const COLUMNS: &'static [&'static str] = &["name", "company_id", "created_at", "updated_at"];
    type Draft = SiteDraft;
    type Patch = SitePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            company_id: row.try_get("company_id")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }

    fn from_draft(id: String, draft: SiteDraft, now: DateTime<Utc>) -> Self {
        Site::from_draft(id, draft, now)
    }

    fn apply(&mut self, patch: SitePatch, now: DateTime<Utc>) {
        Site::apply(self, patch, now)
    }

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, ExError> {
        Ok(query
            .bind(self.name.clone())
            .bind(self.company_id.clone())
            .bind(self.created_at.timestamp_millis())
            .bind(self.updated_at.timestamp_millis()))
    }
}

impl ChildRecord for Site {
    const PARENT_COLUMN: &'static str = "company_id";

    fn parent_id(&self) -> &str {
        &self.company_id
    }
}

impl Record for ValueStream {
    const KIND: EntityKind = EntityKind::ValueStream;
    const COLUMNS: &'static [&'static str] = &["name", "site_id", "created_at", "updated_at"];
    type Draft = ValueStreamDraft;
    type Patch = ValueStreamPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            site_id: row.try_get("site_id")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }

    fn from_draft(id: String, draft: ValueStreamDraft, now: DateTime<Utc>) -> Self {
        ValueStream::from_draft(id, draft, now)
    }

    fn apply(&mut self, patch: ValueStreamPatch, now: DateTime<Utc>) {
        ValueStream::apply(self, patch, now)
    }

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, ExError> {
        Ok(query
            .bind(self.name.clone())
            .bind(self.site_id.clone())
            .bind(self.created_at.timestamp_millis())
            .bind(self.updated_at.timestamp_millis()))
    }
}

impl ChildRecord for ValueStream {
    const PARENT_COLUMN: &'static str = "site_id";

    fn parent_id(&self) -> &str {
        &self.site_id
    }
}

impl Record for Cell {
    const KIND: EntityKind = EntityKind::Cell;
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "description",
        "value_stream_id",
        "created_at",
        "updated_at",
    ];
    type Draft = CellDraft;
    type Patch = CellPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            value_stream_id: row.try_get("value_stream_id")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }

    fn from_draft(id: String, draft: CellDraft, now: DateTime<Utc>) -> Self {
        Cell::from_draft(id, draft, now)
    }

    fn apply(&mut self, patch: CellPatch, now: DateTime<Utc>) {
        Cell::apply(self, patch, now)
    }

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, ExError> {
        Ok(query
            .bind(self.name.clone())
            .bind(self.description.clone())
            .bind(self.value_stream_id.clone())
            .bind(self.created_at.timestamp_millis())
            .bind(self.updated_at.timestamp_millis()))
    }
}

impl ChildRecord for Cell {
    const PARENT_COLUMN: &'static str = "value_stream_id";

    fn parent_id(&self) -> &str {
        &self.value_stream_id
    }
}

impl Record for Machine {
    const KIND: EntityKind = EntityKind::Machine;
    const COLUMNS: &'static [&'static str] = &["name", "cell_id", "created_at", "updated_at"];
    type Draft = MachineDraft;
    type Patch = MachinePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            cell_id: row.try_get("cell_id")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }

    fn from_draft(id: String, draft: MachineDraft, now: DateTime<Utc>) -> Self {
        Machine::from_draft(id, draft, now)
    }

    fn apply(&mut self, patch: MachinePatch, now: DateTime<Utc>) {
        Machine::apply(self, patch, now)
    }

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, ExError> {
        Ok(query
            .bind(self.name.clone())
            .bind(self.cell_id.clone())
            .bind(self.created_at.timestamp_millis())
            .bind(self.updated_at.timestamp_millis()))
    }
}

impl ChildRecord for Machine {
    const PARENT_COLUMN: &'static str = "cell_id";

    fn parent_id(&self) -> &str {
        &self.cell_id
    }
}

impl Record for Part {
    const KIND: EntityKind = EntityKind::Part;
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "number",
        "ideal_cycle_time_secs",
        "attributes",
        "created_at",
        "updated_at",
    ];
    type Draft = PartDraft;
    type Patch = PartPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let attributes: String = row.try_get("attributes")?;
        let attributes: Attributes =
            serde_json::from_str(&attributes).map_err(|e| sqlx::Error::ColumnDecode {
                index: "attributes".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            number: row.try_get("number")?,
            ideal_cycle_time_secs: row.try_get("ideal_cycle_time_secs")?,
            attributes,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }

    fn from_draft(id: String, draft: PartDraft, now: DateTime<Utc>) -> Self {
        Part::from_draft(id, draft, now)
    }

    fn apply(&mut self, patch: PartPatch, now: DateTime<Utc>) {
        Part::apply(self, patch, now)
    }

    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, ExError> {
        let attributes = serde_json::to_string(&self.attributes).map_err(|e| {
            ExError::from(TrackerError::Serialization {
                message: e.to_string(),
            })
            .with_entity(EntityKind::Part)
            .with_entity_id(self.id.as_str())
        })?;

        Ok(query
            .bind(self.name.clone())
            .bind(self.number.clone())
            .bind(self.ideal_cycle_time_secs)
            .bind(attributes)
            .bind(self.created_at.timestamp_millis())
            .bind(self.updated_at.timestamp_millis()))
    }
}
