//! Shared fixtures for store integration tests

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use celltrack_core::model::{
    Cell, CellDraft, Company, CompanyDraft, Part, PartDraft, Site, SiteDraft, ValueStream,
    ValueStreamDraft,
};
use celltrack_store::repo::hierarchy;
use sqlx::SqlitePool;
use std::path::PathBuf;

/// Fresh in-memory database with the schema applied
pub async fn migrated_pool() -> SqlitePool {
    let pool = celltrack_store::connect_in_memory()
        .await
        .expect("Failed to open in-memory database");
    celltrack_store::migrations::apply_migrations(&pool)
        .await
        .expect("Failed to apply migrations");
    pool
}

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// A company → site → value stream → cell chain
pub struct Plant {
    pub company: Company,
    pub site: Site,
    pub value_stream: ValueStream,
    pub cell: Cell,
}

pub async fn create_plant(pool: &SqlitePool, cell_name: &str) -> Plant {
    let company: Company = hierarchy::create(
        pool,
        CompanyDraft {
            name: "Acme".to_string(),
        },
    )
    .await
    .unwrap();
    let site: Site = hierarchy::create(
        pool,
        SiteDraft {
            name: "Plant A".to_string(),
            company_id: company.id.clone(),
        },
    )
    .await
    .unwrap();
    let value_stream: ValueStream = hierarchy::create(
        pool,
        ValueStreamDraft {
            name: "Brackets".to_string(),
            site_id: site.id.clone(),
        },
    )
    .await
    .unwrap();
    let cell = create_cell(pool, &value_stream.id, cell_name).await;

    Plant {
        company,
        site,
        value_stream,
        cell,
    }
}

pub async fn create_cell(pool: &SqlitePool, value_stream_id: &str, name: &str) -> Cell {
    hierarchy::create(
        pool,
        CellDraft {
            name: name.to_string(),
            description: None,
            value_stream_id: value_stream_id.to_string(),
        },
    )
    .await
    .unwrap()
}

pub async fn create_part(pool: &SqlitePool, name: &str) -> Part {
    hierarchy::create(
        pool,
        PartDraft {
            name: name.to_string(),
            number: None,
            ideal_cycle_time_secs: Some(45.0),
            attributes: Default::default(),
        },
    )
    .await
    .unwrap()
}
