// Gateway tests for downtime logging

mod common;

use celltrack_core::model::{DateRange, DowntimeDraft};
use chrono::{TimeZone, Utc};
use common::{ctx, date, gateway};

fn draft(run_id: &str, minutes: i64) -> DowntimeDraft {
    DowntimeDraft {
        run_id: run_id.to_string(),
        reason: "Tool change".to_string(),
        start_time: Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap(),
        duration_minutes: minutes,
    }
}

#[tokio::test]
async fn test_log_downtime_echoes_input_under_fresh_id() {
    let gateway = gateway().await;
    let input = draft("run-1", 25);

    let env = gateway.log_downtime(&ctx(), input.clone()).await;

    assert_eq!(env.message(), "Downtime logged successfully");
    let log = env.into_data().unwrap();
    let millis = log.id.strip_prefix("dt-").expect("dt- prefix");
    assert!(millis.parse::<i64>().is_ok());
    assert_eq!(log.run_id, input.run_id);
    assert_eq!(log.reason, input.reason);
    assert_eq!(log.start_time, input.start_time);
    assert_eq!(log.duration_minutes, 25);
}

#[tokio::test]
async fn test_consecutive_downtime_ids_differ() {
    let gateway = gateway().await;

    let first = gateway.log_downtime(&ctx(), draft("run-1", 5)).await;
    let second = gateway.log_downtime(&ctx(), draft("run-1", 5)).await;

    assert_ne!(first.into_data().unwrap().id, second.into_data().unwrap().id);
}

#[tokio::test]
async fn test_negative_duration_is_stored_as_given() {
    let gateway = gateway().await;

    let logged = gateway
        .log_downtime(&ctx(), draft("run-2", -5))
        .await
        .into_data()
        .unwrap();
    assert_eq!(logged.duration_minutes, -5);

    let stored = gateway
        .get_downtime_for_run(&ctx(), "run-2")
        .await
        .into_data()
        .unwrap();
    assert_eq!(stored, vec![logged]);
}

#[tokio::test]
async fn test_downtime_range_spans_runs() {
    let gateway = gateway().await;
    gateway.log_downtime(&ctx(), draft("run-1", 10)).await;
    gateway.log_downtime(&ctx(), draft("run-2", 15)).await;

    let env = gateway
        .get_downtime_in_range(
            &ctx(),
            &DateRange::new(date("2024-01-05"), date("2024-01-05")),
        )
        .await;
    assert_eq!(env.data().unwrap().len(), 2);

    let env = gateway
        .get_downtime_in_range(
            &ctx(),
            &DateRange::new(date("2024-01-06"), date("2024-01-31")),
        )
        .await;
    assert!(env.data().unwrap().is_empty());
}
