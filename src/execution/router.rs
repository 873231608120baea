//! Order router: validation, OCO decomposition and submission.
//!
//! The router is the error boundary of the crate. Every failure below it,
//! whether validation, venue or storage, is logged here and returned as a
//! [`PlacementError`], so callers get either the recorded order(s) or a typed
//! reason why nothing (or only part of an OCO pair) was placed.
//!
//! # Validation
//!
//! | type          | requires                               |
//! |---------------|----------------------------------------|
//! | `MARKET`      | nothing beyond symbol, side, quantity  |
//! | `LIMIT`       | `price`                                |
//! | `STOP_MARKET` | `stopPrice`                            |
//! | `STOP_LIMIT`  | `stopPrice` and `price`                |
//! | `OCO`         | `price`, `stopPrice`, `stopLimitPrice` |
//!
//! Fields a type does not use are ignored.
//!
//! # OCO
//!
//! An OCO request becomes two independent venue orders tagged with one fresh
//! group id: a `LIMIT` take-profit at `price` and a `STOP_LIMIT` stop-loss
//! triggered at `stopPrice` with limit `stopLimitPrice`. Legs are submitted
//! one after the other. The mock venue fills both; filling one does not
//! cancel the other.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::Decimal;
use crate::persistence::{OcoGroupId, Order};
use crate::types::error::{SimError, ValidationError};

use super::connector::{
    ExchangeConnector, OrderKind, RequestType, Side, TimeInForce, VenueOrder,
};

/// Logical order request as supplied by a caller.
///
/// # Example
///
/// ```rust
/// use order_sim_rs::execution::{OrderRequest, RequestType, Side};
/// use order_sim_rs::dec;
///
/// let request = OrderRequest::new("ethusdt", Side::Sell, RequestType::Oco, dec!(2))
///     .with_price(dec!(3500))
///     .with_stop_price(dec!(3200))
///     .with_stop_limit_price(dec!(3150));
///
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// Trading symbol; upper-cased during validation.
    pub symbol: String,
    /// Order side.
    pub side: Side,
    /// Requested type.
    pub request_type: RequestType,
    /// Order quantity; must be positive.
    pub quantity: Decimal,
    /// Limit price, or take-profit price for OCO.
    pub price: Option<Decimal>,
    /// Trigger price.
    pub stop_price: Option<Decimal>,
    /// Post-trigger limit price of the OCO stop-loss leg.
    pub stop_limit_price: Option<Decimal>,
}

impl OrderRequest {
    /// Creates a request with no prices set.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        side: Side,
        request_type: RequestType,
        quantity: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            request_type,
            quantity,
            price: None,
            stop_price: None,
            stop_limit_price: None,
        }
    }

    /// Builds a request from raw caller strings.
    ///
    /// Side and type are matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::UnknownSide` or
    /// `ValidationError::UnknownOrderType` if either string is not recognised.
    pub fn parse(
        symbol: &str,
        side: &str,
        order_type: &str,
        quantity: Decimal,
        price: Option<Decimal>,
        stop_price: Option<Decimal>,
        stop_limit_price: Option<Decimal>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            symbol: symbol.to_string(),
            side: side.parse()?,
            request_type: order_type.parse()?,
            quantity,
            price,
            stop_price,
            stop_limit_price,
        })
    }

    /// Sets the limit (or take-profit) price.
    #[must_use]
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the trigger price.
    #[must_use]
    pub fn with_stop_price(mut self, stop_price: Decimal) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    /// Sets the OCO stop-loss limit price.
    #[must_use]
    pub fn with_stop_limit_price(mut self, stop_limit_price: Decimal) -> Self {
        self.stop_limit_price = Some(stop_limit_price);
        self
    }

    /// Checks the request against the fields its type requires and
    /// normalizes it.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found: empty symbol,
    /// non-positive quantity, or a missing required price.
    pub fn validate(&self) -> Result<ValidatedRequest, ValidationError> {
        let symbol = self.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        if self.quantity <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveQuantity(
                self.quantity.to_string(),
            ));
        }

        let kind = match self.request_type {
            RequestType::Market => OrderKind::Market,
            RequestType::Limit => OrderKind::Limit {
                price: self.require(self.price, "price")?,
            },
            RequestType::StopMarket => OrderKind::StopMarket {
                stop_price: self.require(self.stop_price, "stopPrice")?,
            },
            RequestType::StopLimit => OrderKind::StopLimit {
                stop_price: self.require(self.stop_price, "stopPrice")?,
                price: self.require(self.price, "price")?,
            },
            RequestType::Oco => {
                return Ok(ValidatedRequest::Oco(OcoSpec {
                    symbol,
                    side: self.side,
                    quantity: self.quantity,
                    take_profit_price: self.require(self.price, "price")?,
                    stop_price: self.require(self.stop_price, "stopPrice")?,
                    stop_limit_price: self.require(self.stop_limit_price, "stopLimitPrice")?,
                }));
            }
        };

        Ok(ValidatedRequest::Single(VenueOrder::new(
            symbol,
            self.side,
            self.quantity,
            kind,
        )))
    }

    fn require(
        &self,
        value: Option<Decimal>,
        field: &'static str,
    ) -> Result<Decimal, ValidationError> {
        value.ok_or_else(|| ValidationError::MissingField {
            order_type: self.request_type.to_string(),
            field,
        })
    }
}

/// Validated OCO request, before the group id is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcoSpec {
    /// Normalized symbol.
    pub symbol: String,
    /// Side shared by both legs.
    pub side: Side,
    /// Quantity shared by both legs.
    pub quantity: Decimal,
    /// Limit price of the take-profit leg.
    pub take_profit_price: Decimal,
    /// Trigger price of the stop-loss leg.
    pub stop_price: Decimal,
    /// Limit price of the stop-loss leg once triggered.
    pub stop_limit_price: Decimal,
}

impl OcoSpec {
    /// Builds the two venue orders for `group_id`: take-profit first.
    #[must_use]
    pub fn legs(&self, group_id: &OcoGroupId, tif: TimeInForce) -> (VenueOrder, VenueOrder) {
        let take_profit = VenueOrder::new(
            self.symbol.clone(),
            self.side,
            self.quantity,
            OrderKind::Limit {
                price: self.take_profit_price,
            },
        )
        .with_time_in_force(tif)
        .with_oco_group(group_id.clone());

        let stop_loss = VenueOrder::new(
            self.symbol.clone(),
            self.side,
            self.quantity,
            OrderKind::StopLimit {
                stop_price: self.stop_price,
                price: self.stop_limit_price,
            },
        )
        .with_time_in_force(tif)
        .with_oco_group(group_id.clone());

        (take_profit, stop_loss)
    }
}

/// Outcome of [`OrderRequest::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedRequest {
    /// A single venue order.
    Single(VenueOrder),
    /// An OCO pair to be split into two legs.
    Oco(OcoSpec),
}

/// The two recorded legs of an OCO request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcoPair {
    /// Group id shared by both legs.
    pub group_id: OcoGroupId,
    /// `LIMIT` take-profit leg.
    pub take_profit: Order,
    /// `STOP_LIMIT` stop-loss leg.
    pub stop_loss: Order,
}

/// Successful placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// A single recorded order.
    Single(Order),
    /// Both legs of an OCO request.
    Oco(OcoPair),
}

impl Placement {
    /// Returns the recorded orders in submission order.
    #[must_use]
    pub fn orders(&self) -> Vec<&Order> {
        match self {
            Placement::Single(order) => vec![order],
            Placement::Oco(pair) => vec![&pair.take_profit, &pair.stop_loss],
        }
    }
}

/// Why a placement failed.
#[derive(Debug, Error)]
pub enum PlacementError {
    /// The request was invalid; nothing was submitted.
    #[error("order rejected: {0}")]
    Rejected(#[from] ValidationError),

    /// The venue or the order log failed; nothing was recorded.
    #[error("order submission failed: {0}")]
    SubmissionFailed(#[source] SimError),

    /// The take-profit leg was recorded but the stop-loss leg failed.
    #[error("OCO group {group_id} partially placed (take-profit order {}): {source}", .take_profit.order_id)]
    PartialOco {
        /// Group id of the pair.
        group_id: OcoGroupId,
        /// The leg that was recorded.
        take_profit: Box<Order>,
        /// Failure of the second leg.
        #[source]
        source: SimError,
    },
}

impl PlacementError {
    /// Returns true if no order was recorded.
    #[must_use]
    pub fn nothing_placed(&self) -> bool {
        !matches!(self, PlacementError::PartialOco { .. })
    }
}

/// Router configuration.
///
/// # Example
///
/// ```rust
/// use order_sim_rs::execution::{RouterConfig, TimeInForce};
///
/// let config = RouterConfig::default();
/// assert_eq!(config.time_in_force, TimeInForce::Gtc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouterConfig {
    /// Time in force put on resting orders (`LIMIT`, `STOP_LIMIT`).
    pub time_in_force: TimeInForce,
}

impl RouterConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time in force for resting orders.
    #[must_use]
    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = tif;
        self
    }
}

/// Router statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouterStats {
    /// Orders recorded by the venue, counting each OCO leg.
    pub orders_placed: usize,
    /// OCO requests with both legs recorded.
    pub oco_groups: usize,
    /// Requests that failed validation.
    pub rejected: usize,
    /// Requests that passed validation but failed at the venue or log.
    pub failed: usize,
}

/// Validates requests and routes them to a venue.
pub struct OrderRouter {
    config: RouterConfig,
    venue: Arc<dyn ExchangeConnector>,
    stats: RouterStats,
}

impl std::fmt::Debug for OrderRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderRouter")
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl OrderRouter {
    /// Creates a router submitting to `venue`.
    #[must_use]
    pub fn new(config: RouterConfig, venue: Arc<dyn ExchangeConnector>) -> Self {
        Self {
            config,
            venue,
            stats: RouterStats::default(),
        }
    }

    /// Creates a router with default configuration.
    #[must_use]
    pub fn with_defaults(venue: Arc<dyn ExchangeConnector>) -> Self {
        Self::new(RouterConfig::default(), venue)
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Returns the placement statistics.
    #[must_use]
    pub fn stats(&self) -> &RouterStats {
        &self.stats
    }

    /// Places an order from raw caller strings.
    ///
    /// The symbol is upper-cased, side and type are matched
    /// case-insensitively.
    ///
    /// # Errors
    ///
    /// See [`OrderRouter::place_order`]; unknown side or type strings are
    /// reported as `PlacementError::Rejected`.
    #[allow(clippy::too_many_arguments)]
    pub async fn place_order_raw(
        &mut self,
        symbol: &str,
        side: &str,
        order_type: &str,
        quantity: Decimal,
        price: Option<Decimal>,
        stop_price: Option<Decimal>,
        stop_limit_price: Option<Decimal>,
    ) -> Result<Placement, PlacementError> {
        match OrderRequest::parse(
            symbol,
            side,
            order_type,
            quantity,
            price,
            stop_price,
            stop_limit_price,
        ) {
            Ok(request) => self.place_order(request).await,
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Validates `request` and submits it.
    ///
    /// # Errors
    ///
    /// - `PlacementError::Rejected` if validation fails; nothing is submitted.
    /// - `PlacementError::SubmissionFailed` if the venue or the log fails
    ///   before any order is recorded.
    /// - `PlacementError::PartialOco` if an OCO take-profit leg was recorded
    ///   and the stop-loss leg failed. The recorded leg is not rolled back.
    pub async fn place_order(
        &mut self,
        request: OrderRequest,
    ) -> Result<Placement, PlacementError> {
        let validated = match request.validate() {
            Ok(validated) => validated,
            Err(e) => return Err(self.reject(e)),
        };

        match validated {
            ValidatedRequest::Single(order) => self.place_single(order).await,
            ValidatedRequest::Oco(spec) => self.place_oco(spec).await,
        }
    }

    async fn place_single(&mut self, mut order: VenueOrder) -> Result<Placement, PlacementError> {
        if order.kind.is_resting() {
            order = order.with_time_in_force(self.config.time_in_force);
        }

        match self.venue.submit_order(order).await {
            Ok(recorded) => {
                self.stats.orders_placed += 1;
                info!(
                    order_id = recorded.order_id,
                    symbol = %recorded.symbol,
                    side = %recorded.side,
                    order_type = %recorded.order_type,
                    quantity = %recorded.quantity,
                    "order placed"
                );
                Ok(Placement::Single(recorded))
            }
            Err(e) => {
                self.stats.failed += 1;
                error!(error = %e, "error placing order");
                Err(PlacementError::SubmissionFailed(e))
            }
        }
    }

    async fn place_oco(&mut self, spec: OcoSpec) -> Result<Placement, PlacementError> {
        let group_id = OcoGroupId::generate();
        let (take_profit_leg, stop_loss_leg) = spec.legs(&group_id, self.config.time_in_force);

        let take_profit = match self.venue.submit_order(take_profit_leg).await {
            Ok(order) => order,
            Err(e) => {
                self.stats.failed += 1;
                error!(error = %e, group_id = %group_id, "error placing OCO take-profit leg");
                return Err(PlacementError::SubmissionFailed(e));
            }
        };
        self.stats.orders_placed += 1;

        let stop_loss = match self.venue.submit_order(stop_loss_leg).await {
            Ok(order) => order,
            Err(e) => {
                self.stats.failed += 1;
                warn!(
                    group_id = %group_id,
                    take_profit_order_id = take_profit.order_id,
                    "OCO take-profit leg recorded without its stop-loss leg"
                );
                error!(error = %e, group_id = %group_id, "error placing OCO stop-loss leg");
                return Err(PlacementError::PartialOco {
                    group_id,
                    take_profit: Box::new(take_profit),
                    source: e,
                });
            }
        };
        self.stats.orders_placed += 1;
        self.stats.oco_groups += 1;

        info!(
            group_id = %group_id,
            symbol = %spec.symbol,
            side = %spec.side,
            take_profit_order_id = take_profit.order_id,
            stop_loss_order_id = stop_loss.order_id,
            "OCO orders placed"
        );

        Ok(Placement::Oco(OcoPair {
            group_id,
            take_profit,
            stop_loss,
        }))
    }

    fn reject(&mut self, e: ValidationError) -> PlacementError {
        self.stats.rejected += 1;
        error!(error = %e, "error placing order");
        PlacementError::Rejected(e)
    }
}
