//! Result types returned by the rental and return engines.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BikeCategory;

/// The outcome of a successful rental.
///
/// Captures the units handed out, the rounded billable duration, and the
/// fees due. `display_hours` is the rounded duration in hours format:
/// for half-hourly categories a 1-block rental shows as 0.5 hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalResult {
    /// The rented category.
    pub category: BikeCategory,
    /// Serial numbers of the rented units, in selection order.
    pub unit_ids: Vec<String>,
    /// Billed duration in billing-unit blocks.
    pub billed_units: u32,
    /// Billed duration in hours format for display.
    pub display_hours: Decimal,
    /// Fee per rented unit (unit price times billed blocks).
    pub per_unit_fee: Decimal,
    /// Total fee across all rented units.
    pub total_fee: Decimal,
    /// When the rental started.
    pub rented_at: NaiveDateTime,
    /// When the units are due back.
    pub estimated_return_at: NaiveDateTime,
}

/// The outcome of a successful return.
///
/// `excess_fee` is zero for an on-time return; otherwise it is the unit
/// price times the rounded-up number of overdue billing blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnResult {
    /// Serial number of the returned unit.
    pub unit_id: String,
    /// The unit's category.
    pub category: BikeCategory,
    /// When the unit was due back, as computed at rental time.
    pub estimated_return_at: NaiveDateTime,
    /// When the unit actually came back.
    pub returned_at: NaiveDateTime,
    /// Overdue duration in billing-unit blocks (zero when on time).
    pub excess_units: u32,
    /// Overdue duration in hours format for display.
    pub excess_hours: Decimal,
    /// Surcharge for the overdue duration (zero when on time).
    pub excess_fee: Decimal,
}
