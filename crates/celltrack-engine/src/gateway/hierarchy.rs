//! Plant hierarchy operations
//!
//! Generic over the hierarchy entity types through `Record`, so
//! `gateway.get::<Cell>(&ctx, id)` and `gateway.list::<Site>(&ctx)` share one
//! code path.

use super::boundary::{capitalize, guarded, Messages};
use super::Gateway;
use celltrack_core::errors::Result;
use celltrack_core::model::{Cell, Company, Machine, Site, ValueStream};
use celltrack_core::Envelope;
use celltrack_core_types::RequestContext;
use celltrack_store::repo::hierarchy as repo;
use celltrack_store::repo::{ChildRecord, Record};
use serde::Serialize;
use sqlx::SqlitePool;

/// A company with everything beneath it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyNode {
    #[serde(flatten)]
    pub company: Company,
    pub sites: Vec<SiteNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteNode {
    #[serde(flatten)]
    pub site: Site,
    pub value_streams: Vec<ValueStreamNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueStreamNode {
    #[serde(flatten)]
    pub value_stream: ValueStream,
    pub cells: Vec<CellNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellNode {
    #[serde(flatten)]
    pub cell: Cell,
    pub machines: Vec<Machine>,
}

impl Gateway {
    /// Every row of `R`, ordered by name
    pub async fn list<R: Record>(&self, ctx: &RequestContext) -> Envelope<Vec<R>> {
        let op = format!("list_{}", R::KIND.table());
        let plural = R::KIND.plural();
        guarded(
            ctx,
            &op,
            Messages::new(
                format!("{} fetched successfully", capitalize(plural)),
                format!("Failed to fetch {}", plural),
            ),
            repo::list::<R>(&self.pool),
        )
        .await
    }

    /// Children of `parent_id`; an unknown parent yields an empty list
    pub async fn list_by_parent<R: ChildRecord>(
        &self,
        ctx: &RequestContext,
        parent_id: &str,
    ) -> Envelope<Vec<R>> {
        let op = format!("list_{}_by_parent", R::KIND.table());
        let plural = R::KIND.plural();
        guarded(
            ctx,
            &op,
            Messages::new(
                format!("{} fetched successfully", capitalize(plural)),
                format!("Failed to fetch {}", plural),
            ),
            repo::list_by_parent::<R>(&self.pool, parent_id),
        )
        .await
    }

    pub async fn get<R: Record>(&self, ctx: &RequestContext, id: &str) -> Envelope<R> {
        let op = format!("get_{}", R::KIND.table());
        let label = R::KIND.label();
        guarded(
            ctx,
            &op,
            Messages::new(
                format!("{} fetched successfully", capitalize(label)),
                format!("Failed to fetch {}", label),
            ),
            repo::get::<R>(&self.pool, id),
        )
        .await
    }

    /// Insert a new row; a dangling parent reference is a constraint violation
    pub async fn create<R: Record>(&self, ctx: &RequestContext, draft: R::Draft) -> Envelope<R> {
        let op = format!("create_{}", R::KIND.table());
        let label = R::KIND.label();
        guarded(
            ctx,
            &op,
            Messages::new(
                format!("{} created successfully", capitalize(label)),
                format!("Failed to create {}", label),
            ),
            repo::create::<R>(&self.pool, draft),
        )
        .await
    }

    pub async fn update<R: Record>(
        &self,
        ctx: &RequestContext,
        id: &str,
        patch: R::Patch,
    ) -> Envelope<R> {
        let op = format!("update_{}", R::KIND.table());
        let label = R::KIND.label();
        guarded(
            ctx,
            &op,
            Messages::new(
                format!("{} updated successfully", capitalize(label)),
                format!("Failed to update {}", label),
            ),
            repo::update::<R>(&self.pool, id, patch),
        )
        .await
    }

    /// Remove a row; refused while children still reference it
    pub async fn delete<R: Record>(&self, ctx: &RequestContext, id: &str) -> Envelope<()> {
        let op = format!("delete_{}", R::KIND.table());
        let label = R::KIND.label();
        guarded(
            ctx,
            &op,
            Messages::new(
                format!("{} deleted successfully", capitalize(label)),
                format!("Failed to delete {}", label),
            ),
            repo::delete::<R>(&self.pool, id),
        )
        .await
    }

    /// The whole Company → Site → Value Stream → Cell → Machine tree
    pub async fn hierarchy_tree(&self, ctx: &RequestContext) -> Envelope<Vec<CompanyNode>> {
        guarded(
            ctx,
            "hierarchy_tree",
            Messages::new(
                "Hierarchy fetched successfully",
                "Failed to fetch hierarchy",
            ),
            build_tree(&self.pool),
        )
        .await
    }
}

async fn build_tree(pool: &SqlitePool) -> Result<Vec<CompanyNode>> {
    let mut tree = Vec::new();
    for company in repo::list::<Company>(pool).await? {
        let mut sites = Vec::new();
        for site in repo::list_by_parent::<Site>(pool, &company.id).await? {
            let mut value_streams = Vec::new();
            for value_stream in repo::list_by_parent::<ValueStream>(pool, &site.id).await? {
                let mut cells = Vec::new();
                for cell in repo::list_by_parent::<Cell>(pool, &value_stream.id).await? {
                    let machines = repo::list_by_parent::<Machine>(pool, &cell.id).await?;
                    cells.push(CellNode { cell, machines });
                }
                value_streams.push(ValueStreamNode {
                    value_stream,
                    cells,
                });
            }
            sites.push(SiteNode {
                site,
                value_streams,
            });
        }
        tree.push(CompanyNode { company, sites });
    }
    Ok(tree)
}
