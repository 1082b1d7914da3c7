//! Response types for the rental shop API.
//!
//! This module defines the success response bodies, the error response
//! structure, and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{BicycleUnit, BikeCategory, SalesTransaction};

/// Response body for `GET /inventory`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryResponse {
    /// Units matching the query filters, in serial-number order.
    pub units: Vec<BicycleUnit>,
    /// Per-category availability counts over the whole inventory,
    /// unaffected by the query filters.
    pub availability: Vec<CategoryAvailability>,
}

/// Availability counts for one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryAvailability {
    /// The category.
    pub category: BikeCategory,
    /// Units currently in the shop.
    pub available: u32,
    /// Units currently out with renters.
    pub rented: u32,
    /// All units of the category.
    pub total: u32,
}

/// Response body for `POST /inventory`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertResponse {
    /// Serial numbers assigned to the new units.
    pub unit_ids: Vec<String>,
}

/// Response body for `GET /transactions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsResponse {
    /// The open business date.
    pub date: NaiveDate,
    /// The day's transactions in append order.
    pub transactions: Vec<SalesTransaction>,
    /// Sum of all transaction amounts.
    pub total_revenue: Decimal,
}

/// Response body for `GET /report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    /// The reported business date.
    pub date: NaiveDate,
    /// The rendered plain-text report.
    pub report: String,
    /// Where the report was written, when saving was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<String>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::UnknownCategory { category } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "UNKNOWN_CATEGORY",
                    format!("Unknown bicycle category: {}", category),
                    "Supported categories are adult, kid, tandem, family, and pgk",
                ),
            },
            EngineError::UnitNotFound { unit_id } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(
                    "UNIT_NOT_FOUND",
                    format!("Bicycle not found: {}", unit_id),
                ),
            },
            EngineError::UnitNotAvailable { unit_id } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(
                    "UNIT_NOT_AVAILABLE",
                    format!("Bicycle {} is already rented out", unit_id),
                ),
            },
            EngineError::UnitNotRented { unit_id } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(
                    "UNIT_NOT_RENTED",
                    format!("Bicycle {} is not currently rented", unit_id),
                ),
            },
            EngineError::InsufficientInventory {
                category,
                requested,
                available,
            } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INSUFFICIENT_INVENTORY",
                    format!(
                        "Insufficient {} bicycles available: requested {}, available {}",
                        category, requested, available
                    ),
                    "Reduce the quantity or wait for returns",
                ),
            },
            EngineError::InvalidRequest { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(
                    "VALIDATION_ERROR",
                    format!("Invalid field '{}': {}", field, message),
                ),
            },
            EngineError::InventoryInconsistency { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "INVENTORY_INCONSISTENCY",
                    "Inventory state is inconsistent",
                    message,
                ),
            },
            EngineError::StorageFailure { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "STORAGE_ERROR",
                    "Storage operation failed",
                    format!("{}: {}", path, message),
                ),
            },
        }
    }
}
