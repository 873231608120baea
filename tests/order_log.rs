//! End-to-end placement against the JSON order log.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use order_sim_rs::dec;
use order_sim_rs::execution::{
    MockConfig, MockExchangeConnector, OrderRouter, OrderType, Placement, PlacementError, Side,
};
use order_sim_rs::persistence::{JsonFileRepository, OrderRepository, OrderStatus};
use order_sim_rs::report::group_orders;

async fn open(path: &Path) -> (OrderRouter, Arc<dyn OrderRepository>) {
    let repo: Arc<dyn OrderRepository> = Arc::new(JsonFileRepository::load(path).await.unwrap());
    let venue = MockExchangeConnector::new(
        MockConfig::default().with_fill_latency(Duration::ZERO),
        Arc::clone(&repo),
    )
    .await
    .unwrap();
    (OrderRouter::with_defaults(Arc::new(venue)), repo)
}

#[tokio::test]
async fn limit_and_oco_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.json");

    let (mut router, repo) = open(&path).await;
    router
        .place_order_raw("btcusdt", "buy", "LIMIT", dec!(1.5), Some(dec!(65000)), None, None)
        .await
        .unwrap();
    let oco = router
        .place_order_raw(
            "ethusdt",
            "sell",
            "OCO",
            dec!(2),
            Some(dec!(3500)),
            Some(dec!(3200)),
            Some(dec!(3150)),
        )
        .await
        .unwrap();
    let Placement::Oco(pair) = oco else {
        panic!("expected an OCO pair");
    };

    let before = repo.all().await.unwrap();
    assert_eq!(before.len(), 3);
    assert_eq!(before.last(), Some(&pair.stop_loss));

    let reloaded = JsonFileRepository::load(&path).await.unwrap();
    let after = reloaded.all().await.unwrap();
    assert_eq!(after, before);

    let limit = &after[0];
    assert_eq!(limit.symbol, "BTCUSDT");
    assert_eq!(limit.side, Side::Buy);
    assert_eq!(limit.order_type, OrderType::Limit);
    assert_eq!(limit.quantity, dec!(1.5));
    assert_eq!(limit.price, Some(dec!(65000)));
    assert_eq!(limit.status, OrderStatus::Filled);
    assert!(limit.oco_group_id.is_none());

    let report = group_orders(&after);
    assert_eq!(report.standalone.len(), 1);
    assert_eq!(report.oco_groups.len(), 1);
    let group = &report.oco_groups[0];
    assert_eq!(group.group_id, pair.group_id);
    assert!(group.is_complete());
    let types: Vec<OrderType> = group.legs.iter().map(|o| o.order_type).collect();
    assert_eq!(types, vec![OrderType::Limit, OrderType::StopLimit]);
}

#[tokio::test]
async fn rejected_request_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.json");

    let (mut router, repo) = open(&path).await;
    let err = router
        .place_order_raw("btcusdt", "buy", "STOP_LIMIT", dec!(1), None, Some(dec!(64000)), None)
        .await
        .unwrap_err();

    assert!(matches!(err, PlacementError::Rejected(_)));
    assert!(repo.is_empty().await.unwrap());
    assert!(!path.exists());
}

#[tokio::test]
async fn ids_stay_unique_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.json");

    let (mut first, _) = open(&path).await;
    let a = first
        .place_order_raw("btcusdt", "buy", "MARKET", dec!(1), None, None, None)
        .await
        .unwrap();

    let (mut second, repo) = open(&path).await;
    let b = second
        .place_order_raw("btcusdt", "buy", "MARKET", dec!(1), None, None, None)
        .await
        .unwrap();

    assert!(b.orders()[0].order_id > a.orders()[0].order_id);
    assert_eq!(repo.len().await.unwrap(), 2);
}

#[tokio::test]
async fn clear_empties_log_and_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.json");

    let (mut router, repo) = open(&path).await;
    router
        .place_order_raw("btcusdt", "sell", "STOP_MARKET", dec!(3), None, Some(dec!(60000)), None)
        .await
        .unwrap();
    repo.clear().await.unwrap();

    assert!(repo.all().await.unwrap().is_empty());
    let reloaded = JsonFileRepository::load(&path).await.unwrap();
    assert!(reloaded.is_empty().await.unwrap());
}
