//! Persistence layer for the order log.
//!
//! This module provides:
//! - The persisted [`Order`] record and [`OcoGroupId`]
//! - The [`OrderRepository`] trait (append, full-list retrieval, bulk clear)
//! - [`JsonFileRepository`], the durable JSON file log
//! - [`InMemoryRepository`] for tests
//!
//! # Example
//!
//! ```rust,no_run
//! use order_sim_rs::persistence::{JsonFileRepository, OrderRepository};
//!
//! # async fn run() -> order_sim_rs::types::SimResult<()> {
//! let repo = JsonFileRepository::load("orders.json").await?;
//! for order in repo.all().await? {
//!     println!("{} {} {}", order.order_id, order.symbol, order.order_type);
//! }
//! # Ok(())
//! # }
//! ```

mod file;
mod memory;
mod repository;
mod types;

pub use file::{DEFAULT_STORE_PATH, JsonFileRepository};
pub use memory::InMemoryRepository;
pub use repository::OrderRepository;
pub use types::{OcoGroupId, Order, OrderStatus};
pub(crate) use types::current_timestamp;
