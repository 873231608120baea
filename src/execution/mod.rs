//! Execution module: venue seam, mock venue and order routing.
//!
//! # Overview
//!
//! - **Order types**: `Side`, `OrderType`, `RequestType`, `OrderKind`,
//!   `TimeInForce`, `VenueOrder`
//! - **Connector trait**: `ExchangeConnector`
//! - **Mock implementation**: `MockExchangeConnector`, which fills every order
//!   and appends it to the order log
//! - **Routing**: `OrderRouter`, which validates requests and splits OCO
//!   requests into two linked legs
//!
//! # Example
//!
//! ```rust
//! use order_sim_rs::execution::{OrderRequest, RequestType, Side, ValidatedRequest};
//! use order_sim_rs::dec;
//!
//! let request = OrderRequest::new("btcusdt", Side::Buy, RequestType::Limit, dec!(1.5))
//!     .with_price(dec!(65000));
//!
//! match request.validate().unwrap() {
//!     ValidatedRequest::Single(order) => assert_eq!(order.symbol, "BTCUSDT"),
//!     ValidatedRequest::Oco(_) => unreachable!(),
//! }
//! ```

/// Exchange connector trait and types.
pub mod connector;

/// Mock exchange connector.
pub mod mock;

/// Order validation and routing.
pub mod router;

pub use connector::{
    ExchangeConnector, OrderKind, OrderType, RequestType, Side, TimeInForce, VenueOrder,
};
pub use mock::{MockConfig, MockExchangeConnector};
pub use router::{
    OcoPair, OcoSpec, OrderRequest, OrderRouter, Placement, PlacementError, RouterConfig,
    RouterStats, ValidatedRequest,
};
