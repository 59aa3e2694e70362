// Gateway tests for the plant hierarchy operations

mod common;

use celltrack_core::model::{
    Cell, CellPatch, Machine, MachineDraft, Site, SiteDraft, ValueStream, ValueStreamDraft,
};
use common::{create_cell, create_plant, ctx, gateway};
use serde_json::Value;

#[tokio::test]
async fn test_cells_listed_by_value_stream() {
    let gateway = gateway().await;
    let plant = create_plant(&gateway, "Weld").await;
    create_cell(&gateway, &plant.value_stream.id, "Assembly").await;

    let other: ValueStream = gateway
        .create(
            &ctx(),
            ValueStreamDraft {
                name: "Hinges".to_string(),
                site_id: plant.site.id.clone(),
            },
        )
        .await
        .into_data()
        .unwrap();
    create_cell(&gateway, &other.id, "Press").await;

    let env = gateway
        .list_by_parent::<Cell>(&ctx(), &plant.value_stream.id)
        .await;

    assert!(env.is_success());
    assert_eq!(env.message(), "Cells fetched successfully");
    let names: Vec<_> = env
        .data()
        .unwrap()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["Assembly", "Weld"]);
}

#[tokio::test]
async fn test_unknown_parent_yields_empty_list() {
    let gateway = gateway().await;
    create_plant(&gateway, "Weld").await;

    let env = gateway.list_by_parent::<Cell>(&ctx(), "vs-missing").await;

    assert!(env.is_success());
    assert!(env.data().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_missing_value_stream_is_not_found() {
    let gateway = gateway().await;

    let env = gateway.get::<ValueStream>(&ctx(), "vs-404").await;

    assert!(env.is_not_found());
    assert_eq!(env.message(), "Value stream not found");
    assert_eq!(env.error_code(), Some("ERR_NOT_FOUND"));
}

#[tokio::test]
async fn test_create_with_dangling_parent_fails_generically() {
    let gateway = gateway().await;

    let env = gateway
        .create::<Site>(
            &ctx(),
            SiteDraft {
                name: "Orphan".to_string(),
                company_id: "co-missing".to_string(),
            },
        )
        .await;

    assert!(!env.is_success());
    assert!(!env.is_not_found());
    assert_eq!(env.message(), "Failed to create site");
    assert_eq!(env.error_code(), Some("ERR_CONSTRAINT_VIOLATION"));
}

#[tokio::test]
async fn test_update_cell_keeps_unpatched_fields() {
    let gateway = gateway().await;
    let plant = create_plant(&gateway, "Weld").await;

    let env = gateway
        .update::<Cell>(
            &ctx(),
            &plant.cell.id,
            CellPatch {
                description: Some(Some("Two robots".to_string())),
                ..Default::default()
            },
        )
        .await;

    let cell = env.into_data().unwrap();
    assert_eq!(cell.name, "Weld");
    assert_eq!(cell.description.as_deref(), Some("Two robots"));
    assert_eq!(cell.created_at, plant.cell.created_at);
    assert!(cell.updated_at >= plant.cell.updated_at);
}

#[tokio::test]
async fn test_delete_refused_while_children_exist() {
    let gateway = gateway().await;
    let plant = create_plant(&gateway, "Weld").await;

    let env = gateway
        .delete::<ValueStream>(&ctx(), &plant.value_stream.id)
        .await;
    assert_eq!(env.error_code(), Some("ERR_CONSTRAINT_VIOLATION"));

    assert!(gateway
        .delete::<Cell>(&ctx(), &plant.cell.id)
        .await
        .is_success());
    assert!(gateway
        .delete::<ValueStream>(&ctx(), &plant.value_stream.id)
        .await
        .is_success());
    assert!(gateway
        .delete::<ValueStream>(&ctx(), &plant.value_stream.id)
        .await
        .is_not_found());
}

#[tokio::test]
async fn test_hierarchy_tree_nests_every_level() {
    let gateway = gateway().await;
    let plant = create_plant(&gateway, "Weld").await;
    gateway
        .create::<Machine>(
            &ctx(),
            MachineDraft {
                name: "Robot 1".to_string(),
                cell_id: plant.cell.id.clone(),
            },
        )
        .await
        .into_data()
        .unwrap();

    let env = gateway.hierarchy_tree(&ctx()).await;
    let tree = env.data().unwrap();

    assert_eq!(tree.len(), 1);
    let cell = &tree[0].sites[0].value_streams[0].cells[0];
    assert_eq!(cell.cell.id, plant.cell.id);
    assert_eq!(cell.machines[0].name, "Robot 1");

    let json = serde_json::to_value(&env).unwrap();
    assert_eq!(json["success"], Value::Bool(true));
    assert_eq!(json["data"][0]["name"], "Acme");
    assert_eq!(
        json["data"][0]["sites"][0]["valueStreams"][0]["cells"][0]["machines"][0]["name"],
        "Robot 1"
    );
}
