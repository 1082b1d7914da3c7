//! Request types for the rental shop API.
//!
//! This module defines the JSON request structures for the inventory,
//! rental, and return endpoints, plus the contact number validation
//! applied at the API boundary.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Request body for the `POST /inventory` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertRequest {
    /// Category name (e.g. "adult", "pgk"), case-insensitive.
    pub category: String,
    /// Number of bicycles to add.
    pub quantity: u32,
}

/// Request body for the `POST /rentals` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentRequest {
    /// Category name, case-insensitive.
    pub category: String,
    /// Requested duration in hours, before rounding.
    pub hours: Decimal,
    /// When the rental starts.
    pub time: NaiveDateTime,
    /// Renter contact number (8 digits, starting with 8 or 9).
    pub contact: String,
    /// Number of bicycles to rent.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Request body for the `POST /returns` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnRequest {
    /// Serial number of the unit being returned.
    pub unit_id: String,
    /// When the unit came back.
    pub time: NaiveDateTime,
}

/// Query parameters for the `GET /inventory` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryQuery {
    /// Optional category filter, case-insensitive.
    pub category: Option<String>,
    /// Optional status filter: "available" or "rented".
    pub status: Option<String>,
}

/// Query parameters for the `GET /report` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    /// When true, the rendered report is also written to a
    /// `SALES_REPORT_<date>.txt` file in the data directory.
    #[serde(default)]
    pub save: bool,
}

/// Validates a renter contact number.
///
/// Local mobile numbers only: exactly 8 digits, starting with 8 or 9.
/// The core stores contact as an opaque string; this rule applies at
/// the API boundary.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRequest`] for any other shape.
pub fn validate_contact(contact: &str) -> EngineResult<()> {
    let valid = contact.len() == 8
        && contact.chars().all(|c| c.is_ascii_digit())
        && contact.starts_with(['8', '9']);
    if valid {
        Ok(())
    } else {
        Err(EngineError::InvalidRequest {
            field: "contact".to_string(),
            message: "must be 8 digits starting with 8 or 9".to_string(),
        })
    }
}
