//! Shared types.

/// Error taxonomy.
pub mod error;

pub use error::{SimError, SimResult, StorageError, ValidationError, VenueError};
