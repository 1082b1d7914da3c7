//! Error types for the rental engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while tracking rentals.

use thiserror::Error;

/// The main error type for the rental engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application. Every failed
/// operation is a no-op on state: the inventory and ledger are unchanged
/// whenever one of these errors is returned.
///
/// # Example
///
/// ```
/// use rental_engine::error::EngineError;
///
/// let error = EngineError::UnknownCategory {
///     category: "cargo".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown bicycle category: cargo");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The bicycle category is not part of the shop's closed set.
    #[error("Unknown bicycle category: {category}")]
    UnknownCategory {
        /// The category string that could not be resolved.
        category: String,
    },

    /// No bicycle with the given serial number exists in the inventory.
    #[error("Bicycle not found: {unit_id}")]
    UnitNotFound {
        /// The serial number that was looked up.
        unit_id: String,
    },

    /// The bicycle exists but is not available for rent.
    #[error("Bicycle '{unit_id}' is not available for rent")]
    UnitNotAvailable {
        /// The serial number of the unit.
        unit_id: String,
    },

    /// The bicycle exists but is not currently rented out.
    #[error("Bicycle '{unit_id}' is not currently rented")]
    UnitNotRented {
        /// The serial number of the unit.
        unit_id: String,
    },

    /// Fewer units of the category are available than were requested.
    #[error(
        "Insufficient {category} bicycles available: requested {requested}, available {available}"
    )]
    InsufficientInventory {
        /// The requested category.
        category: String,
        /// How many units were requested.
        requested: u32,
        /// How many units are available.
        available: u32,
    },

    /// The inventory contradicted itself mid-operation.
    ///
    /// Non-recoverable for the current operation; the operation aborts
    /// before committing any mutation.
    #[error("Inventory inconsistency: {message}")]
    InventoryInconsistency {
        /// A description of the contradiction.
        message: String,
    },

    /// A request field was invalid or out of range.
    #[error("Invalid request field '{field}': {message}")]
    InvalidRequest {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Reading or writing persisted shop state failed.
    #[error("Storage failure at '{path}': {message}")]
    StorageFailure {
        /// The path being read or written.
        path: String,
        /// A description of the I/O or serialization failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
