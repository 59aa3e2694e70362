//! Seed importer orchestration
//!
//! Imports a parsed seed as one transaction. Ids come from the seed, so a
//! second import of the same file refreshes rows instead of duplicating them.

use crate::errors::{from_sqlx, Result};
use crate::repo::hierarchy::upsert_tx;
use crate::seed::format_v1::SeedV1;
use crate::seed::{compute_seed_digest, parse_seed_file, parse_seed_str};
use celltrack_core::model::time::now_millis;
use celltrack_core::model::{Cell, Company, Machine, Part, Site, ValueStream};
use serde::Serialize;
use sqlx::SqlitePool;
use std::path::Path;

/// Rows written by one import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub digest: String,
    pub companies: usize,
    pub sites: usize,
    pub value_streams: usize,
    pub cells: usize,
    pub machines: usize,
    pub parts: usize,
}

/// Import a seed file into the database
///
/// Returns a report carrying the seed digest and per-entity row counts.
pub async fn import_seed(pool: &SqlitePool, path: &Path) -> Result<ImportReport> {
    let seed = parse_seed_file(path)?;
    import_parsed(pool, &seed).await
}

/// Import seed YAML held in memory
pub async fn import_seed_str(pool: &SqlitePool, content: &str) -> Result<ImportReport> {
    let seed = parse_seed_str(content)?;
    import_parsed(pool, &seed).await
}

async fn import_parsed(pool: &SqlitePool, seed: &SeedV1) -> Result<ImportReport> {
    let mut report = ImportReport {
        digest: compute_seed_digest(seed)?,
        ..Default::default()
    };
    let now = now_millis();

    let mut tx = pool.begin().await.map_err(from_sqlx)?;

    for company in &seed.companies {
        let row = Company {
            id: company.id.clone(),
            name: company.name.clone(),
            created_at: now,
            updated_at: now,
        };
        upsert_tx(&mut tx, &row).await?;
        report.companies += 1;

        for site in &company.sites {
            let row = Site {
                id: site.id.clone(),
                name: site.name.clone(),
                company_id: company.id.clone(),
                created_at: now,
                updated_at: now,
            };
            upsert_tx(&mut tx, &row).await?;
            report.sites += 1;

            for vs in &site.value_streams {
                let row = ValueStream {
                    id: vs.id.clone(),
                    name: vs.name.clone(),
                    site_id: site.id.clone(),
                    created_at: now,
                    updated_at: now,
                };
                upsert_tx(&mut tx, &row).await?;
                report.value_streams += 1;

                for cell in &vs.cells {
                    let row = Cell {
                        id: cell.id.clone(),
                        name: cell.name.clone(),
                        description: cell.description.clone(),
                        value_stream_id: vs.id.clone(),
                        created_at: now,
                        updated_at: now,
                    };
                    upsert_tx(&mut tx, &row).await?;
                    report.cells += 1;

                    for machine in &cell.machines {
                        let row = Machine {
                            id: machine.id.clone(),
                            name: machine.name.clone(),
                            cell_id: cell.id.clone(),
                            created_at: now,
                            updated_at: now,
                        };
                        upsert_tx(&mut tx, &row).await?;
                        report.machines += 1;
                    }
                }
            }
        }
    }

    for part in &seed.parts {
        let row = Part {
            id: part.id.clone(),
            name: part.name.clone(),
            number: part.number.clone(),
            ideal_cycle_time_secs: part.ideal_cycle_time_secs,
            attributes: part.attributes.clone(),
            created_at: now,
            updated_at: now,
        };
        upsert_tx(&mut tx, &row).await?;
        report.parts += 1;
    }

    tx.commit().await.map_err(from_sqlx)?;

    tracing::info!(
        digest = %report.digest,
        companies = report.companies,
        cells = report.cells,
        parts = report.parts,
        "Imported seed"
    );

    Ok(report)
}
