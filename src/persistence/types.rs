//! Persisted order record and related identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Decimal;
use crate::execution::{OrderType, Side, TimeInForce, VenueOrder};

/// Identifier shared by the two legs of an OCO pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OcoGroupId(String);

impl OcoGroupId {
    /// Wraps an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random (v4) identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OcoGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Order status. The mock venue fills every order on submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Fully executed.
    Filled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Filled => write!(f, "FILLED"),
        }
    }
}

/// An order as recorded in the log.
///
/// Created once by the venue and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Trading symbol.
    pub symbol: String,
    /// Order side.
    pub side: Side,
    /// Stored order type.
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Order quantity.
    pub quantity: Decimal,
    /// Limit price.
    pub price: Option<Decimal>,
    /// Trigger price.
    pub stop_price: Option<Decimal>,
    /// Order status.
    pub status: OrderStatus,
    /// Venue-assigned identifier.
    pub order_id: u64,
    /// Fill timestamp in milliseconds since the epoch.
    pub timestamp: u64,
    /// Group id when this order is one leg of an OCO pair.
    ///
    /// The `oco_group_id` alias reads older logs that used the snake-case
    /// key. A record carrying both keys is rejected as a duplicate field.
    #[serde(alias = "oco_group_id")]
    pub oco_group_id: Option<OcoGroupId>,
    /// Advisory time in force.
    #[serde(default)]
    pub time_in_force: Option<TimeInForce>,
}

impl Order {
    /// Records `request` as filled with the given id and timestamp.
    #[must_use]
    pub fn filled(request: VenueOrder, order_id: u64, timestamp: u64) -> Self {
        Self {
            symbol: request.symbol,
            side: request.side,
            order_type: request.kind.order_type(),
            quantity: request.quantity,
            price: request.kind.price(),
            stop_price: request.kind.stop_price(),
            status: OrderStatus::Filled,
            order_id,
            timestamp,
            oco_group_id: request.oco_group_id,
            time_in_force: request.time_in_force,
        }
    }
}

/// Returns current timestamp in milliseconds.
pub(crate) fn current_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
