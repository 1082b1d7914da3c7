//! The return engine.
//!
//! Takes a rented bicycle back into the shop, computes any overdue
//! surcharge against the estimated return time recorded at rental, and
//! clears the unit's rental fields. A second return of the same unit
//! fails without adding another charge.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::calculation::rounding::overdue_units;
use crate::error::{EngineError, EngineResult};
use crate::inventory::InventoryStore;
use crate::ledger::SalesLedger;
use crate::models::{ReturnResult, SalesTransaction, TransactionKind};

/// Returns a rented bicycle and charges any overdue surcharge.
///
/// The overrun is measured in raw seconds against the estimated return
/// time and rounded up to whole billing-unit blocks, so a return one
/// second late is charged one full block. When a surcharge applies, one
/// [`TransactionKind::ExcessCharge`] entry is appended to the ledger,
/// stamped with the return time. An on-time or early return records no
/// transaction.
///
/// # Errors
///
/// Returns [`EngineError::UnitNotFound`] for an unknown serial number
/// and [`EngineError::UnitNotRented`] when the unit is already in the
/// shop. In both cases nothing has been mutated.
pub fn return_unit(
    inventory: &mut InventoryStore,
    ledger: &mut SalesLedger,
    unit_id: &str,
    returned_at: NaiveDateTime,
) -> EngineResult<ReturnResult> {
    let unit = inventory
        .get(unit_id)
        .ok_or_else(|| EngineError::UnitNotFound {
            unit_id: unit_id.to_string(),
        })?;

    if !unit.is_rented() {
        return Err(EngineError::UnitNotRented {
            unit_id: unit_id.to_string(),
        });
    }

    let estimated_return_at =
        unit.estimated_return_at
            .ok_or_else(|| EngineError::InventoryInconsistency {
                message: format!("rented unit {} has no estimated return time", unit_id),
            })?;

    let category = unit.category;
    let unit_price = unit.unit_price;
    let billing_unit = unit.billing_unit;
    let contact = unit.contact.clone();

    let excess_units = overdue_units(returned_at - estimated_return_at, billing_unit)?;
    let excess_fee = unit_price * Decimal::from(excess_units);

    if excess_units > 0 {
        ledger.append(SalesTransaction {
            id: Uuid::new_v4(),
            kind: TransactionKind::ExcessCharge,
            category,
            unit_id: unit_id.to_string(),
            unit_price,
            billing_unit_label: billing_unit.label().to_string(),
            timestamp: returned_at,
            amount: excess_fee,
            contact,
        });
    }

    inventory.mark_returned(unit_id)?;

    Ok(ReturnResult {
        unit_id: unit_id.to_string(),
        category,
        estimated_return_at,
        returned_at,
        excess_units,
        excess_hours: billing_unit.display_hours(excess_units),
        excess_fee,
    })
}
