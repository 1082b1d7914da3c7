//! Core data models for the rental engine.
//!
//! This module contains all the domain models used throughout the engine.

mod bicycle;
mod results;
mod transaction;

pub use bicycle::{BicycleUnit, BikeCategory, BillingUnit, UnitStatus};
pub use results::{RentalResult, ReturnResult};
pub use transaction::{SalesTransaction, TransactionKind};
