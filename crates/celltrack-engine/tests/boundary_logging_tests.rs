// Every gateway call logs one start event and one end or end_error event,
// tagged with the caller's request id

mod common;

use celltrack_core::logging_facility::init_test_capture;
use celltrack_core::model::{Cell, CellRangeQuery};
use celltrack_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_USER_ID,
};
use common::{ctx, date, gateway};

#[tokio::test]
async fn test_successful_call_logs_start_and_end() {
    let capture = init_test_capture();
    let gateway = gateway().await;
    let ctx = ctx();

    let env = gateway
        .get_bottleneck_analysis(
            &ctx,
            &CellRangeQuery::new("cell-1", date("2024-01-01"), date("2024-01-31")),
        )
        .await;
    assert!(env.is_success());

    let events = capture.events_for_request(ctx.request_id.as_str());
    let kinds: Vec<_> = events.iter().filter_map(|e| e.event.as_deref()).collect();
    assert_eq!(kinds, vec![EVENT_START, EVENT_END]);
    assert!(events
        .iter()
        .all(|e| e.op.as_deref() == Some("get_bottleneck_analysis")));
    assert_eq!(events[0].field(FIELD_USER_ID), Some("u-1"));
    assert!(events[1].field(FIELD_DURATION_MS).is_some());
}

#[tokio::test]
async fn test_failed_call_logs_detail_but_envelope_stays_generic() {
    let capture = init_test_capture();
    let gateway = gateway().await;
    let ctx = ctx();

    let env = gateway.get::<Cell>(&ctx, "cell-404").await;
    assert!(env.is_not_found());

    let events = capture.events_for_request(ctx.request_id.as_str());
    let kinds: Vec<_> = events.iter().filter_map(|e| e.event.as_deref()).collect();
    assert_eq!(kinds, vec![EVENT_START, EVENT_END_ERROR]);
    assert_eq!(events[1].op.as_deref(), Some("get_cells"));
    assert_eq!(events[1].field(FIELD_ERR_CODE), Some("ERR_NOT_FOUND"));

    let text = serde_json::to_string(&env).unwrap();
    assert!(!text.contains("cell-404"));
}
