//! Exchange connector trait and order types.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Decimal;
use crate::persistence::{OcoGroupId, Order};
use crate::types::error::{SimResult, ValidationError};

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    /// Buy order.
    Buy,
    /// Sell order.
    Sell,
}

impl Side {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = ValidationError;

    /// Parses `buy` / `sell` in any case, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            _ => Err(ValidationError::UnknownSide(s.to_string())),
        }
    }
}

/// Type of an order as stored in the log.
///
/// OCO is not a stored type; an OCO request becomes one `Limit` and one
/// `StopLimit` order sharing a group id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Market order.
    Market,
    /// Limit order.
    Limit,
    /// Stop order that becomes a limit order once triggered.
    StopLimit,
    /// Stop order that becomes a market order once triggered.
    StopMarket,
}

impl OrderType {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
            OrderType::StopLimit => "STOP_LIMIT",
            OrderType::StopMarket => "STOP_MARKET",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type of an incoming request. Superset of [`OrderType`] with `Oco`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    /// Market order.
    Market,
    /// Limit order.
    Limit,
    /// Stop-limit order.
    StopLimit,
    /// Stop-market order.
    StopMarket,
    /// Take-profit limit plus stop-loss stop-limit, linked by a group id.
    Oco,
}

impl RequestType {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Market => "MARKET",
            RequestType::Limit => "LIMIT",
            RequestType::StopLimit => "STOP_LIMIT",
            RequestType::StopMarket => "STOP_MARKET",
            RequestType::Oco => "OCO",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestType {
    type Err = ValidationError;

    /// Parses the upper-case wire names in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MARKET" => Ok(RequestType::Market),
            "LIMIT" => Ok(RequestType::Limit),
            "STOP_LIMIT" => Ok(RequestType::StopLimit),
            "STOP_MARKET" => Ok(RequestType::StopMarket),
            "OCO" => Ok(RequestType::Oco),
            _ => Err(ValidationError::UnknownOrderType(s.to_string())),
        }
    }
}

/// Time-in-force annotation. Carried on the order, never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeInForce {
    /// Good till cancelled.
    #[default]
    Gtc,
}

/// Price fields of a venue order, one case per stored order type.
///
/// Each case carries exactly the prices its type needs, so a limit order
/// without a price or a market order with a stop price cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    /// Execute at the prevailing price.
    Market,
    /// Execute at `price` or better.
    Limit {
        /// Limit price.
        price: Decimal,
    },
    /// Market order armed at `stop_price`.
    StopMarket {
        /// Trigger price.
        stop_price: Decimal,
    },
    /// Limit order at `price`, armed at `stop_price`.
    StopLimit {
        /// Trigger price.
        stop_price: Decimal,
        /// Limit price after trigger.
        price: Decimal,
    },
}

impl OrderKind {
    /// Returns the stored order type.
    #[must_use]
    pub fn order_type(&self) -> OrderType {
        match self {
            OrderKind::Market => OrderType::Market,
            OrderKind::Limit { .. } => OrderType::Limit,
            OrderKind::StopMarket { .. } => OrderType::StopMarket,
            OrderKind::StopLimit { .. } => OrderType::StopLimit,
        }
    }

    /// Returns the limit price, if the kind has one.
    #[must_use]
    pub fn price(&self) -> Option<Decimal> {
        match self {
            OrderKind::Limit { price } | OrderKind::StopLimit { price, .. } => Some(*price),
            OrderKind::Market | OrderKind::StopMarket { .. } => None,
        }
    }

    /// Returns the trigger price, if the kind has one.
    #[must_use]
    pub fn stop_price(&self) -> Option<Decimal> {
        match self {
            OrderKind::StopMarket { stop_price } | OrderKind::StopLimit { stop_price, .. } => {
                Some(*stop_price)
            }
            OrderKind::Market | OrderKind::Limit { .. } => None,
        }
    }

    /// Returns true if the kind rests on a book (has a limit price).
    #[must_use]
    pub fn is_resting(&self) -> bool {
        self.price().is_some()
    }
}

/// Normalized order handed to a venue.
///
/// # Example
///
/// ```rust
/// use order_sim_rs::execution::{OrderKind, OrderType, Side, TimeInForce, VenueOrder};
/// use order_sim_rs::dec;
///
/// let order = VenueOrder::new("BTCUSDT", Side::Buy, dec!(0.5), OrderKind::Limit { price: dec!(65000) })
///     .with_time_in_force(TimeInForce::Gtc);
///
/// assert_eq!(order.kind.order_type(), OrderType::Limit);
/// assert_eq!(order.kind.price(), Some(dec!(65000)));
/// assert!(order.oco_group_id.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueOrder {
    /// Trading symbol, upper case.
    pub symbol: String,
    /// Order side.
    pub side: Side,
    /// Order quantity.
    pub quantity: Decimal,
    /// Type and prices.
    pub kind: OrderKind,
    /// Advisory time in force.
    pub time_in_force: Option<TimeInForce>,
    /// Group id when the order is one leg of an OCO pair.
    pub oco_group_id: Option<OcoGroupId>,
}

impl VenueOrder {
    /// Creates a venue order with no time in force and no group.
    #[must_use]
    pub fn new(symbol: impl Into<String>, side: Side, quantity: Decimal, kind: OrderKind) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            quantity,
            kind,
            time_in_force: None,
            oco_group_id: None,
        }
    }

    /// Sets the time in force.
    #[must_use]
    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    /// Tags the order as a leg of an OCO group.
    #[must_use]
    pub fn with_oco_group(mut self, group_id: OcoGroupId) -> Self {
        self.oco_group_id = Some(group_id);
        self
    }
}

/// Venue seam.
///
/// Implementations accept a normalized [`VenueOrder`] and return the order as
/// recorded in the log.
#[async_trait]
pub trait ExchangeConnector: Send + Sync {
    /// Submits an order and returns the recorded fill.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Venue` if the venue rejects the order, or
    /// `SimError::Storage` if the order log cannot be written.
    async fn submit_order(&self, order: VenueOrder) -> SimResult<Order>;
}
