//! # order-sim-rs
//!
//! A local order-placement simulator. Order requests (market, limit,
//! stop-limit, stop-market and one-cancels-the-other pairs) are validated
//! against the fields their type requires, forwarded to a mock venue that
//! assigns identifiers and fills them immediately, and appended to a durable
//! JSON order log.
//!
//! ## Layout
//!
//! - [`persistence`]: the order log (`OrderRepository`, file-backed and
//!   in-memory implementations) and the persisted [`persistence::Order`].
//! - [`execution`]: the venue seam (`ExchangeConnector`), the mock venue and
//!   the [`execution::OrderRouter`] that validates and splits OCO requests.
//! - [`report`]: grouping of the log into standalone orders and OCO groups,
//!   plus plain-text tables.
//! - [`types`]: error taxonomy.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use order_sim_rs::dec;
//! use order_sim_rs::execution::{MockConfig, MockExchangeConnector, OrderRouter, Placement};
//! use order_sim_rs::persistence::{InMemoryRepository, OrderRepository};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let repo: Arc<dyn OrderRepository> = Arc::new(InMemoryRepository::new());
//! let config = MockConfig::default().with_fill_latency(Duration::ZERO);
//! let venue = MockExchangeConnector::new(config, Arc::clone(&repo)).await.unwrap();
//! let mut router = OrderRouter::with_defaults(Arc::new(venue));
//!
//! let placement = router
//!     .place_order_raw("btcusdt", "buy", "LIMIT", dec!(1.5), Some(dec!(65000)), None, None)
//!     .await
//!     .unwrap();
//!
//! match placement {
//!     Placement::Single(order) => assert_eq!(order.symbol, "BTCUSDT"),
//!     Placement::Oco(_) => unreachable!(),
//! }
//! assert_eq!(repo.len().await.unwrap(), 1);
//! # });
//! ```

pub mod execution;
pub mod persistence;
pub mod report;
pub mod types;

pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;
