//! Duration rounding per billing unit.
//!
//! This module provides the ceiling rules that turn a requested rental
//! duration into a billable block count, and an overdue duration into a
//! surcharge block count.

use chrono::Duration;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{EngineError, EngineResult};
use crate::models::BillingUnit;

/// The result of rounding a requested duration to billing-unit blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedDuration {
    /// Billable duration in billing-unit blocks.
    pub billed_units: u32,
    /// The billed duration in hours format for display (blocks for
    /// hourly categories, blocks / 2 for half-hourly ones).
    pub display_hours: Decimal,
    /// The duration recorded on the unit. Hourly categories record the
    /// rounded integer hours; half-hourly categories record the
    /// unrounded request. This asymmetry mirrors the shop's billing
    /// display convention.
    pub booked_duration: Decimal,
}

/// Rounds a requested duration up to the category's billing unit.
///
/// Hourly categories round up to the next whole hour; half-hourly
/// categories round up to the next half-hour block. The result is the
/// smallest billing-unit multiple greater than or equal to the request.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRequest`] when the requested duration
/// is zero, negative, or too large to bill.
///
/// # Examples
///
/// ```
/// use rental_engine::calculation::round_duration;
/// use rental_engine::models::BillingUnit;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rounded = round_duration(Decimal::from_str("0.4").unwrap(), BillingUnit::HalfHourly).unwrap();
/// assert_eq!(rounded.billed_units, 1);
/// assert_eq!(rounded.display_hours, Decimal::from_str("0.5").unwrap());
/// ```
pub fn round_duration(
    requested_hours: Decimal,
    billing_unit: BillingUnit,
) -> EngineResult<RoundedDuration> {
    if requested_hours <= Decimal::ZERO {
        return Err(EngineError::InvalidRequest {
            field: "requested_hours".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    let blocks = match billing_unit {
        BillingUnit::Hourly => requested_hours.ceil(),
        BillingUnit::HalfHourly => (requested_hours * Decimal::from(2)).ceil(),
    };

    let billed_units = blocks.to_u32().ok_or_else(|| EngineError::InvalidRequest {
        field: "requested_hours".to_string(),
        message: format!("duration {} is too large to bill", requested_hours),
    })?;

    let booked_duration = match billing_unit {
        BillingUnit::Hourly => Decimal::from(billed_units),
        BillingUnit::HalfHourly => requested_hours,
    };

    Ok(RoundedDuration {
        billed_units,
        display_hours: billing_unit.display_hours(billed_units),
        booked_duration,
    })
}

/// Rounds an overdue duration up to surcharge blocks.
///
/// Any positive overrun bills at least one block: a return one second
/// past the estimated time is charged a full billing unit. A return at
/// or before the estimated time yields zero blocks.
pub fn overdue_units(elapsed: Duration, billing_unit: BillingUnit) -> EngineResult<u32> {
    if elapsed <= Duration::zero() {
        return Ok(0);
    }

    let block_seconds = Decimal::from(billing_unit.minutes() * 60);
    let blocks = (Decimal::from(elapsed.num_seconds()) / block_seconds).ceil();

    blocks.to_u32().ok_or_else(|| EngineError::InvalidRequest {
        field: "returned_at".to_string(),
        message: "overdue duration is out of range".to_string(),
    })
}
