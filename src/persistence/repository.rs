//! Repository trait for the order log.

use async_trait::async_trait;

use crate::persistence::types::Order;
use crate::types::error::SimResult;

/// Append-only, ordered order log.
///
/// Implementations keep orders in insertion order. Durable implementations
/// persist the full sequence on every mutation, and a successful call
/// guarantees the persisted sequence equals the in-memory one.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Appends an order to the end of the log.
    async fn append(&self, order: &Order) -> SimResult<()>;

    /// Returns every order in insertion order.
    async fn all(&self) -> SimResult<Vec<Order>>;

    /// Removes every order.
    async fn clear(&self) -> SimResult<()>;

    /// Returns the number of orders.
    async fn len(&self) -> SimResult<usize>;

    /// Returns true if the log holds no orders.
    async fn is_empty(&self) -> SimResult<bool> {
        Ok(self.len().await? == 0)
    }

    /// Returns the largest order id in the log.
    async fn max_order_id(&self) -> SimResult<Option<u64>> {
        Ok(self.all().await?.iter().map(|o| o.order_id).max())
    }
}
