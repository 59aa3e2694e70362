//! Shared fixtures for gateway integration tests

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use celltrack_core::model::{
    Cell, CellDraft, Company, CompanyDraft, Site, SiteDraft, ValueStream, ValueStreamDraft,
};
use celltrack_core_types::{Identity, RequestContext};
use celltrack_engine::Gateway;
use chrono::NaiveDate;

/// Gateway over a fresh in-memory database with the schema applied
pub async fn gateway() -> Gateway {
    let pool = celltrack_store::connect_in_memory()
        .await
        .expect("Failed to open in-memory database");
    celltrack_store::migrations::apply_migrations(&pool)
        .await
        .expect("Failed to apply migrations");
    Gateway::new(pool)
}

pub fn ctx() -> RequestContext {
    ctx_for("u-1")
}

pub fn ctx_for(user_id: &str) -> RequestContext {
    RequestContext::new(Identity::new(user_id))
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub struct Plant {
    pub company: Company,
    pub site: Site,
    pub value_stream: ValueStream,
    pub cell: Cell,
}

/// Company → site → value stream → cell, created through the gateway
pub async fn create_plant(gateway: &Gateway, cell_name: &str) -> Plant {
    let ctx = ctx();
    let company: Company = gateway
        .create(
            &ctx,
            CompanyDraft {
                name: "Acme".to_string(),
            },
        )
        .await
        .into_data()
        .expect("company");
    let site: Site = gateway
        .create(
            &ctx,
            SiteDraft {
                name: "Plant A".to_string(),
                company_id: company.id.clone(),
            },
        )
        .await
        .into_data()
        .expect("site");
    let value_stream: ValueStream = gateway
        .create(
            &ctx,
            ValueStreamDraft {
                name: "Brackets".to_string(),
                site_id: site.id.clone(),
            },
        )
        .await
        .into_data()
        .expect("value stream");
    let cell = create_cell(gateway, &value_stream.id, cell_name).await;

    Plant {
        company,
        site,
        value_stream,
        cell,
    }
}

pub async fn create_cell(gateway: &Gateway, value_stream_id: &str, name: &str) -> Cell {
    gateway
        .create(
            &ctx(),
            CellDraft {
                name: name.to_string(),
                description: None,
                value_stream_id: value_stream_id.to_string(),
            },
        )
        .await
        .into_data()
        .expect("cell")
}
