//! HTTP API module for the rental shop.
//!
//! This module provides the REST endpoints for managing inventory,
//! renting and returning bicycles, and reading the day's sales figures.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{InsertRequest, RentRequest, ReturnRequest, validate_contact};
pub use response::{ApiError, InsertResponse, InventoryResponse, ReportResponse, TransactionsResponse};
pub use state::AppState;
