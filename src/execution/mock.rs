//! Mock exchange connector.
//!
//! Fills every order in full on submission and appends it to the order log.
//! There is no book, no price discovery and no rejection path.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::persistence::{Order, OrderRepository, current_timestamp};
use crate::types::error::SimResult;

use super::connector::{ExchangeConnector, VenueOrder};

/// Mock venue configuration.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use order_sim_rs::execution::MockConfig;
///
/// let config = MockConfig::default()
///     .with_fill_latency(Duration::from_millis(250))
///     .with_min_order_id(1);
///
/// assert_eq!(config.fill_latency, Duration::from_millis(250));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockConfig {
    /// Simulated execution latency per order.
    pub fill_latency: Duration,
    /// Lowest order id the venue hands out.
    pub min_order_id: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            fill_latency: Duration::from_secs(1),
            min_order_id: 100_000,
        }
    }
}

impl MockConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the simulated execution latency.
    #[must_use]
    pub fn with_fill_latency(mut self, latency: Duration) -> Self {
        self.fill_latency = latency;
        self
    }

    /// Sets the lowest order id.
    #[must_use]
    pub fn with_min_order_id(mut self, min_order_id: u64) -> Self {
        self.min_order_id = min_order_id;
        self
    }
}

/// Mock venue that fills everything.
///
/// Order ids come from a monotonic counter seeded above the largest id
/// already in the log, so ids stay unique across restarts.
pub struct MockExchangeConnector {
    config: MockConfig,
    repository: Arc<dyn OrderRepository>,
    next_order_id: AtomicU64,
}

impl std::fmt::Debug for MockExchangeConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockExchangeConnector")
            .field("config", &self.config)
            .field("next_order_id", &self.next_order_id)
            .finish_non_exhaustive()
    }
}

impl MockExchangeConnector {
    /// Creates a venue writing to `repository`.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read to seed the id
    /// counter.
    pub async fn new(config: MockConfig, repository: Arc<dyn OrderRepository>) -> SimResult<Self> {
        let seed = match repository.max_order_id().await? {
            Some(max) => max.saturating_add(1).max(config.min_order_id),
            None => config.min_order_id,
        };

        Ok(Self {
            config,
            repository,
            next_order_id: AtomicU64::new(seed),
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    /// Returns the order log this venue writes to.
    #[must_use]
    pub fn repository(&self) -> &Arc<dyn OrderRepository> {
        &self.repository
    }

    fn next_order_id(&self) -> u64 {
        self.next_order_id.fetch_add(1, Ordering::Relaxed)
    }
}

#[async_trait]
impl ExchangeConnector for MockExchangeConnector {
    async fn submit_order(&self, order: VenueOrder) -> SimResult<Order> {
        if !self.config.fill_latency.is_zero() {
            tokio::time::sleep(self.config.fill_latency).await;
        }

        let filled = Order::filled(order, self.next_order_id(), current_timestamp());
        self.repository.append(&filled).await?;

        debug!(
            order_id = filled.order_id,
            symbol = %filled.symbol,
            order_type = %filled.order_type,
            "mock venue filled order"
        );
        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dec;
    use crate::execution::{OrderKind, OrderType, Side};
    use crate::persistence::{InMemoryRepository, OrderStatus};
    use std::time::Instant;

    fn instant_config() -> MockConfig {
        MockConfig::default().with_fill_latency(Duration::ZERO)
    }

    fn existing(order_id: u64) -> Order {
        Order::filled(
            VenueOrder::new("BTCUSDT", Side::Buy, dec!(1), OrderKind::Market),
            order_id,
            1000,
        )
    }

    #[tokio::test]
    async fn test_submit_fills_and_appends() {
        let repo: Arc<dyn OrderRepository> = Arc::new(InMemoryRepository::new());
        let venue = MockExchangeConnector::new(instant_config(), Arc::clone(&repo))
            .await
            .unwrap();

        let before = current_timestamp();
        let order = venue
            .submit_order(VenueOrder::new(
                "BTCUSDT",
                Side::Sell,
                dec!(0.1),
                OrderKind::StopMarket {
                    stop_price: dec!(60000),
                },
            ))
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Filled);
        assert_eq!(order.order_type, OrderType::StopMarket);
        assert_eq!(order.order_id, 100_000);
        assert!(order.timestamp >= before);
        assert_eq!(repo.all().await.unwrap(), vec![order]);
    }

    #[tokio::test]
    async fn test_order_ids_are_monotonic() {
        let repo: Arc<dyn OrderRepository> = Arc::new(InMemoryRepository::new());
        let venue = MockExchangeConnector::new(instant_config(), repo)
            .await
            .unwrap();

        let request = VenueOrder::new("ETHUSDT", Side::Buy, dec!(1), OrderKind::Market);
        let first = venue.submit_order(request.clone()).await.unwrap();
        let second = venue.submit_order(request).await.unwrap();

        assert_eq!(second.order_id, first.order_id + 1);
    }

    #[tokio::test]
    async fn test_seed_continues_after_existing_ids() {
        let repo: Arc<dyn OrderRepository> = Arc::new(InMemoryRepository::with_orders(vec![
            existing(482_913),
            existing(100_200),
        ]));
        let venue = MockExchangeConnector::new(instant_config(), repo)
            .await
            .unwrap();

        let order = venue
            .submit_order(VenueOrder::new(
                "BTCUSDT",
                Side::Buy,
                dec!(1),
                OrderKind::Market,
            ))
            .await
            .unwrap();

        assert_eq!(order.order_id, 482_914);
    }

    #[tokio::test]
    async fn test_fill_latency_is_applied() {
        let repo: Arc<dyn OrderRepository> = Arc::new(InMemoryRepository::new());
        let config = MockConfig::default().with_fill_latency(Duration::from_millis(20));
        let venue = MockExchangeConnector::new(config, repo).await.unwrap();

        let start = Instant::now();
        venue
            .submit_order(VenueOrder::new(
                "BTCUSDT",
                Side::Buy,
                dec!(1),
                OrderKind::Market,
            ))
            .await
            .unwrap();

        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
