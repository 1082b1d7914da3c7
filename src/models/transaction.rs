//! Sales transaction model.
//!
//! This module defines the immutable transaction record appended to the
//! sales ledger by the rental and return engines.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BikeCategory;

/// The kind of charge a transaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// A rental fee, charged when a unit leaves the shop.
    Rental,
    /// An excess-duration surcharge, charged on a late return.
    ExcessCharge,
}

/// An immutable record of one charge for the business day.
///
/// Created by the rental engine (`Rental`) and by the return engine when
/// a late return incurs a surcharge (`ExcessCharge`). Transactions are
/// appended to the day's ledger and never mutated or deleted.
///
/// # Example
///
/// ```
/// use rental_engine::models::{BikeCategory, SalesTransaction, TransactionKind};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let tx = SalesTransaction {
///     id: uuid::Uuid::new_v4(),
///     kind: TransactionKind::Rental,
///     category: BikeCategory::Adult,
///     unit_id: "A001".to_string(),
///     unit_price: Decimal::from_str("8").unwrap(),
///     billing_unit_label: "per hour".to_string(),
///     timestamp: NaiveDateTime::parse_from_str("2024-06-01 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     amount: Decimal::from_str("16").unwrap(),
///     contact: Some("91234567".to_string()),
/// };
/// assert_eq!(tx.amount, Decimal::from_str("16").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesTransaction {
    /// Unique identifier for this transaction.
    pub id: Uuid,
    /// Whether this is a rental fee or an excess surcharge.
    pub kind: TransactionKind,
    /// The category of the bicycle involved.
    pub category: BikeCategory,
    /// The serial number of the bicycle involved.
    pub unit_id: String,
    /// The unit price that produced the amount.
    pub unit_price: Decimal,
    /// The display label for the unit price ("per hour" / "per 0.5 hour").
    pub billing_unit_label: String,
    /// When the charge was incurred (rental time or return time).
    pub timestamp: NaiveDateTime,
    /// The charged amount.
    pub amount: Decimal,
    /// The renter's contact number, when known.
    #[serde(default)]
    pub contact: Option<String>,
}
