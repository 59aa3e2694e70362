// Gateway tests for shifts and production logging

mod common;

use celltrack_core::model::{Part, PartDraft, ProductionDraft};
use celltrack_core::policy::SingleActiveShiftPolicy;
use celltrack_core_types::RequestContext;
use celltrack_engine::Gateway;
use chrono::{TimeZone, Utc};
use common::{create_plant, ctx, ctx_for, date, gateway};
use std::sync::Arc;

async fn create_part(gateway: &Gateway, ctx: &RequestContext) -> Part {
    gateway
        .create(
            ctx,
            PartDraft {
                name: "Bracket".to_string(),
                number: Some("BR-100".to_string()),
                ideal_cycle_time_secs: Some(45.0),
                attributes: Default::default(),
            },
        )
        .await
        .into_data()
        .unwrap()
}

#[tokio::test]
async fn test_shift_is_scoped_to_caller() {
    let gateway = gateway().await;
    let alice = ctx_for("alice");
    let bob = ctx_for("bob");

    let shift = gateway.start_shift(&alice, None).await.into_data().unwrap();
    assert_eq!(shift.user_id, "alice");

    let env = gateway.get_active_shift(&alice).await;
    assert_eq!(env.data().map(|s| s.id.as_str()), Some(shift.id.as_str()));

    let env = gateway.get_active_shift(&bob).await;
    assert!(env.is_not_found());
    assert_eq!(env.message(), "Shift not found");

    let env = gateway.end_shift(&bob, &shift.id).await;
    assert_eq!(env.error_code(), Some("ERR_FORBIDDEN"));
    assert_eq!(env.message(), "Failed to end shift");
}

#[tokio::test]
async fn test_end_shift_twice_conflicts() {
    let gateway = gateway().await;
    let ctx = ctx();
    let shift = gateway.start_shift(&ctx, None).await.into_data().unwrap();

    let ended = gateway.end_shift(&ctx, &shift.id).await.into_data().unwrap();
    assert!(!ended.active);

    let env = gateway.end_shift(&ctx, &shift.id).await;
    assert_eq!(env.error_code(), Some("ERR_CONFLICT"));

    let history = gateway.list_shifts(&ctx).await.into_data().unwrap();
    assert_eq!(history.len(), 1);
    assert!(!history[0].active);
}

#[tokio::test]
async fn test_single_active_policy_refuses_second_shift() {
    let gateway = gateway()
        .await
        .with_shift_policy(Arc::new(SingleActiveShiftPolicy));
    let ctx = ctx();

    assert!(gateway.start_shift(&ctx, None).await.is_success());
    let env = gateway.start_shift(&ctx, None).await;
    assert_eq!(env.error_code(), Some("ERR_CONFLICT"));
    assert_eq!(env.message(), "Failed to start shift");
}

#[tokio::test]
async fn test_overlapping_shifts_allowed_by_default() {
    let gateway = gateway().await;
    let ctx = ctx();

    assert!(gateway.start_shift(&ctx, None).await.is_success());
    assert!(gateway.start_shift(&ctx, None).await.is_success());
    assert_eq!(gateway.list_shifts(&ctx).await.into_data().unwrap().len(), 2);
}

#[tokio::test]
async fn test_production_attributed_to_active_shift() {
    let gateway = gateway().await;
    let plant = create_plant(&gateway, "Weld").await;
    let ctx = ctx();
    let part = create_part(&gateway, &ctx).await;

    let shift = gateway
        .start_shift(&ctx, Some(plant.cell.id.clone()))
        .await
        .into_data()
        .unwrap();

    let log = gateway
        .record_production(
            &ctx,
            ProductionDraft {
                cell_id: plant.cell.id.clone(),
                part_id: part.id.clone(),
                quantity: 12,
                recorded_at: Some(Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap()),
            },
        )
        .await
        .into_data()
        .unwrap();
    assert_eq!(log.shift_id.as_deref(), Some(shift.id.as_str()));

    // Without an open shift the entry is still recorded
    gateway.end_shift(&ctx, &shift.id).await.into_data().unwrap();
    let log = gateway
        .record_production(
            &ctx,
            ProductionDraft {
                cell_id: plant.cell.id.clone(),
                part_id: part.id.clone(),
                quantity: 8,
                recorded_at: Some(Utc.with_ymd_and_hms(2024, 1, 5, 15, 0, 0).unwrap()),
            },
        )
        .await
        .into_data()
        .unwrap();
    assert_eq!(log.shift_id, None);

    let query = celltrack_core::model::CellRangeQuery::new(
        plant.cell.id.as_str(),
        date("2024-01-05"),
        date("2024-01-05"),
    );
    let logs = gateway.get_production_logs(&ctx, &query).await.into_data().unwrap();
    assert_eq!(logs.len(), 2);

    let daily = gateway.get_daily_production(&ctx, &query).await.into_data().unwrap();
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0].total_quantity, 20);
    assert_eq!(daily[0].entries, 2);
}

#[tokio::test]
async fn test_production_for_unknown_cell_fails() {
    let gateway = gateway().await;
    let ctx = ctx();
    let part = create_part(&gateway, &ctx).await;

    let env = gateway
        .record_production(
            &ctx,
            ProductionDraft {
                cell_id: "cell-missing".to_string(),
                part_id: part.id,
                quantity: 1,
                recorded_at: None,
            },
        )
        .await;

    assert_eq!(env.error_code(), Some("ERR_CONSTRAINT_VIOLATION"));
    assert_eq!(env.message(), "Failed to record production");
}
