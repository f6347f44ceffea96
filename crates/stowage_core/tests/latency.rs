use std::time::Duration;
use stowage_core::{
    AppServices, ItemPatch, ItemService, LatencyConfig, NewItem, OperationLatency,
    PickupService, StoragePlanService,
};
use tokio::time::Instant;

/// Paused-clock timers fire on millisecond ticks, so allow sub-tick slack.
fn assert_waited(started: Instant, expected: Duration) {
    let elapsed = started.elapsed();
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(2),
        "expected ~{expected:?}, waited {elapsed:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn default_delays_match_each_collection() {
    let latency = LatencyConfig::default();
    let items = ItemService::seeded(latency.items).unwrap();
    let pickups = PickupService::seeded(latency.pickups).unwrap();
    let plans = StoragePlanService::seeded(latency.storage_plans).unwrap();

    let started = Instant::now();
    items.get_all().await.unwrap();
    assert_waited(started, Duration::from_millis(300));

    let started = Instant::now();
    pickups.get_all().await.unwrap();
    assert_waited(started, Duration::from_millis(250));

    let started = Instant::now();
    plans.get_all().await.unwrap();
    assert_waited(started, Duration::from_millis(200));
}

#[tokio::test(start_paused = true)]
async fn every_operation_waits_for_its_delay() {
    let items = ItemService::seeded(OperationLatency::with_list_ms(300)).unwrap();

    let started = Instant::now();
    items.get_by_id(1).await.unwrap();
    assert_waited(started, Duration::from_millis(200));

    let started = Instant::now();
    let created = items.create(NewItem::named("Crate")).await.unwrap();
    assert_waited(started, Duration::from_millis(400));

    let started = Instant::now();
    items.update(created.id, ItemPatch::default()).await.unwrap();
    assert_waited(started, Duration::from_millis(350));

    let started = Instant::now();
    items.delete(created.id).await.unwrap();
    assert_waited(started, Duration::from_millis(300));
}

#[tokio::test(start_paused = true)]
async fn failures_also_wait_before_resolving() {
    let items = ItemService::seeded(OperationLatency::with_list_ms(300)).unwrap();

    let started = Instant::now();
    assert!(items.get_by_id(999).await.is_err());
    assert_waited(started, Duration::from_millis(200));
}

#[tokio::test(start_paused = true)]
async fn concurrent_calls_overlap_their_delays() {
    let services = AppServices::in_memory(&LatencyConfig::default()).unwrap();

    let started = Instant::now();
    let (items, pickups) = tokio::join!(services.items.get_all(), services.pickups.get_all());
    items.unwrap();
    pickups.unwrap();

    assert_waited(started, Duration::from_millis(300));
}

#[tokio::test(start_paused = true)]
async fn zero_latency_resolves_immediately() {
    let items = ItemService::seeded(OperationLatency::none()).unwrap();

    let started = Instant::now();
    items.get_all().await.unwrap();
    assert_waited(started, Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn interleaved_writes_apply_in_completion_order() {
    let items = ItemService::seeded(OperationLatency {
        update_ms: 100,
        ..OperationLatency::none()
    })
    .unwrap();

    let first = items.update(
        1,
        ItemPatch {
            location: Some("first".to_string()),
            ..ItemPatch::default()
        },
    );
    let second = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        items
            .update(
                1,
                ItemPatch {
                    location: Some("second".to_string()),
                    ..ItemPatch::default()
                },
            )
            .await
    };
    let (first, second) = tokio::join!(first, second);
    first.unwrap();
    second.unwrap();

    assert_eq!(items.get_by_id(1).await.unwrap().location, "second");
}
