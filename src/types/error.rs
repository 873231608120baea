//! Error types for the order simulator.
//!
//! Errors are layered the same way the components are: the store raises
//! [`StorageError`], the venue raises [`VenueError`] (or forwards storage
//! failures), and request validation raises [`ValidationError`]. All of them
//! fold into [`SimError`], which is what the fallible library functions return
//! through [`SimResult`].

use std::path::PathBuf;

use thiserror::Error;

/// A required field or value was missing or invalid for the requested order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The order type requires a field the request did not carry.
    #[error("{order_type} order requires {field}")]
    MissingField {
        /// Requested order type, e.g. `STOP_LIMIT`.
        order_type: String,
        /// Wire name of the missing field, e.g. `stopPrice`.
        field: &'static str,
    },

    /// Symbol was empty after trimming.
    #[error("symbol must not be empty")]
    EmptySymbol,

    /// Quantity was zero or negative.
    #[error("quantity must be positive, got {0}")]
    NonPositiveQuantity(String),

    /// Side was neither buy nor sell.
    #[error("unknown side: {0}")]
    UnknownSide(String),

    /// Order type was not one of the supported types.
    #[error("unknown order type: {0}")]
    UnknownOrderType(String),
}

/// The persisted order log could not be read or written.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure while reading or writing the log.
    #[error("i/o error on {path}: {source}")]
    Io {
        /// Path of the order log.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The log exists but does not hold a well-formed order list.
    #[error("malformed order log {path}: {source}")]
    Malformed {
        /// Path of the order log.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory sequence could not be serialized.
    #[error("failed to serialize order log: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// The venue refused an order.
///
/// The mock venue fills everything, so nothing produces this today.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VenueError {
    /// Order rejected by the venue.
    #[error("order rejected: {0}")]
    Rejected(String),
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum SimError {
    /// Request failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Order log failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Venue failure.
    #[error(transparent)]
    Venue(#[from] VenueError),
}

/// Result alias used throughout the crate.
pub type SimResult<T> = Result<T, SimError>;
