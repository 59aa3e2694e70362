// Concurrent gateway calls against a file-backed pool

mod common;

use celltrack_core::model::{Cell, CellDraft, CellPatch, ValueStream};
use celltrack_core::policy::SingleActiveShiftPolicy;
use celltrack_engine::Gateway;
use celltrack_store::PoolSettings;
use common::{create_plant, ctx};
use std::sync::Arc;
use tempfile::TempDir;

async fn file_gateway(dir: &TempDir) -> Gateway {
    let url = format!("sqlite://{}", dir.path().join("plant.db").display());
    let pool = celltrack_store::connect(&PoolSettings::new(url))
        .await
        .expect("Failed to open database");
    celltrack_store::migrations::apply_migrations(&pool)
        .await
        .expect("Failed to apply migrations");
    Gateway::new(pool)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_under_different_parents() {
    let dir = TempDir::new().unwrap();
    let gateway = file_gateway(&dir).await;
    let plant = create_plant(&gateway, "Weld").await;

    let mut parents = vec![plant.value_stream.id.clone()];
    for name in ["Hinges", "Frames", "Covers"] {
        let vs: ValueStream = gateway
            .create(
                &ctx(),
                celltrack_core::model::ValueStreamDraft {
                    name: name.to_string(),
                    site_id: plant.site.id.clone(),
                },
            )
            .await
            .into_data()
            .unwrap();
        parents.push(vs.id);
    }

    let handles: Vec<_> = parents
        .iter()
        .flat_map(|parent| (0..5).map(move |i| (parent.clone(), i)))
        .map(|(parent, i)| {
            let gateway = gateway.clone();
            tokio::spawn(async move {
                gateway
                    .create::<Cell>(
                        &ctx(),
                        CellDraft {
                            name: format!("Cell {}", i),
                            description: None,
                            value_stream_id: parent,
                        },
                    )
                    .await
            })
        })
        .collect();

    for result in futures::future::join_all(handles).await {
        assert!(result.unwrap().is_success());
    }

    for parent in &parents {
        let cells = gateway
            .list_by_parent::<Cell>(&ctx(), parent)
            .await
            .into_data()
            .unwrap();
        let expected = if *parent == plant.value_stream.id { 6 } else { 5 };
        assert_eq!(cells.len(), expected);
        assert!(cells.iter().all(|c| &c.value_stream_id == parent));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reads_share_the_pool() {
    let dir = TempDir::new().unwrap();
    let gateway = file_gateway(&dir).await;
    create_plant(&gateway, "Weld").await;

    let reads = (0..20).map(|_| {
        let gateway = gateway.clone();
        async move { gateway.hierarchy_tree(&ctx()).await }
    });

    for env in futures::future::join_all(reads).await {
        assert_eq!(env.data().map(|tree| tree.len()), Some(1));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_of_one_cell_succeed() {
    let dir = TempDir::new().unwrap();
    let gateway = file_gateway(&dir).await;
    let plant = create_plant(&gateway, "Weld").await;

    for round in 0..10 {
        let updates = (0..4).map(|i| {
            let gateway = gateway.clone();
            let id = plant.cell.id.clone();
            tokio::spawn(async move {
                gateway
                    .update::<Cell>(
                        &ctx(),
                        &id,
                        CellPatch {
                            name: Some(format!("Weld {}-{}", round, i)),
                            ..Default::default()
                        },
                    )
                    .await
            })
        });

        for result in futures::future::join_all(updates).await {
            let env = result.unwrap();
            assert!(env.is_success(), "round {}: {:?}", round, env.error_code());
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_shift_starts_admit_exactly_one() {
    let dir = TempDir::new().unwrap();
    let gateway = file_gateway(&dir)
        .await
        .with_shift_policy(Arc::new(SingleActiveShiftPolicy));

    for round in 0..5 {
        let user = format!("u-{}", round);
        let starts = (0..4).map(|_| {
            let gateway = gateway.clone();
            let ctx = common::ctx_for(&user);
            tokio::spawn(async move { gateway.start_shift(&ctx, None).await })
        });

        let mut started = 0;
        let mut codes = Vec::new();
        for result in futures::future::join_all(starts).await {
            let env = result.unwrap();
            if env.is_success() {
                started += 1;
            } else {
                codes.push(env.error_code());
            }
        }

        assert_eq!(started, 1);
        assert_eq!(codes, vec![Some("ERR_CONFLICT"); 3]);
    }
}
