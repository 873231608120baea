//! In-memory repository implementation.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::persistence::repository::OrderRepository;
use crate::persistence::types::Order;
use crate::types::error::SimResult;

/// In-memory order log for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `orders`.
    #[must_use]
    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(RwLock::new(orders)),
        }
    }
}

#[async_trait]
impl OrderRepository for InMemoryRepository {
    async fn append(&self, order: &Order) -> SimResult<()> {
        self.orders.write().await.push(order.clone());
        Ok(())
    }

    async fn all(&self) -> SimResult<Vec<Order>> {
        Ok(self.orders.read().await.clone())
    }

    async fn clear(&self) -> SimResult<()> {
        self.orders.write().await.clear();
        Ok(())
    }

    async fn len(&self) -> SimResult<usize> {
        Ok(self.orders.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::{OrderKind, Side, VenueOrder};
    use rust_decimal_macros::dec;

    fn market(symbol: &str, id: u64) -> Order {
        Order::filled(
            VenueOrder::new(symbol, Side::Buy, dec!(1), OrderKind::Market),
            id,
            1000,
        )
    }

    #[tokio::test]
    async fn test_append_keeps_insertion_order() {
        let repo = InMemoryRepository::new();
        repo.append(&market("BTCUSDT", 3)).await.unwrap();
        repo.append(&market("ETHUSDT", 1)).await.unwrap();

        let all = repo.all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].symbol, "ETHUSDT");
        assert_eq!(repo.max_order_id().await.unwrap(), Some(3));
    }

    #[tokio::test]
    async fn test_clear() {
        let repo = InMemoryRepository::with_orders(vec![market("BTCUSDT", 1)]);
        assert!(!repo.is_empty().await.unwrap());

        repo.clear().await.unwrap();

        assert!(repo.is_empty().await.unwrap());
        assert_eq!(repo.max_order_id().await.unwrap(), None);
    }
}
