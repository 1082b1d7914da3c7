//! The rental engine.
//!
//! Checks out one or more bicycles of a category, computes the upfront
//! fee from the rounded duration, and records one ledger transaction per
//! unit. All preconditions are validated before any unit is touched, so
//! a failed rental leaves both the inventory and the ledger unchanged.

use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::calculation::rounding::round_duration;
use crate::config::PricingTable;
use crate::error::{EngineError, EngineResult};
use crate::inventory::InventoryStore;
use crate::ledger::SalesLedger;
use crate::models::{BikeCategory, RentalResult, SalesTransaction, TransactionKind};

/// A request to rent out one or more bicycles of a single category.
#[derive(Debug, Clone)]
pub struct RentalRequest {
    /// The category to rent from.
    pub category: BikeCategory,
    /// Requested duration in hours, before rounding.
    pub requested_hours: Decimal,
    /// When the rental starts.
    pub rented_at: NaiveDateTime,
    /// Renter contact number, recorded on each unit.
    pub contact: String,
    /// Number of bicycles requested.
    pub quantity: u32,
}

/// Rents out `request.quantity` bicycles of the requested category.
///
/// Units are selected in ascending serial-number order. Each rented
/// unit contributes one [`TransactionKind::Rental`] ledger entry for the
/// per-unit fee; the returned [`RentalResult`] carries the combined
/// total.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRequest`] when the quantity is zero,
/// the duration is not positive, or the estimated return would fall on
/// the next calendar day. Returns
/// [`EngineError::InsufficientInventory`] when fewer units are
/// available than requested. In every error case nothing has been
/// mutated.
pub fn rent(
    inventory: &mut InventoryStore,
    ledger: &mut SalesLedger,
    pricing: &PricingTable,
    request: &RentalRequest,
) -> EngineResult<RentalResult> {
    if request.quantity == 0 {
        return Err(EngineError::InvalidRequest {
            field: "quantity".to_string(),
            message: "must be at least 1".to_string(),
        });
    }

    let category = request.category;
    let billing_unit = pricing.billing_unit(category);
    let unit_price = pricing.unit_price(category);

    let rounded = round_duration(request.requested_hours, billing_unit)?;

    let available = inventory.count_available(category);
    if available < request.quantity {
        return Err(EngineError::InsufficientInventory {
            category: category.to_string(),
            requested: request.quantity,
            available,
        });
    }

    let estimated_return_at = request.rented_at
        + Duration::minutes(i64::from(rounded.billed_units) * billing_unit.minutes());
    if estimated_return_at.date() > request.rented_at.date() {
        return Err(EngineError::InvalidRequest {
            field: "requested_hours".to_string(),
            message: format!(
                "estimated return {} falls past closing; all bicycles must be back the same day",
                estimated_return_at.format("%Y-%m-%d %H:%M")
            ),
        });
    }

    let selected = inventory.find_available(category, request.quantity);
    if selected.len() != request.quantity as usize {
        return Err(EngineError::InventoryInconsistency {
            message: format!(
                "count reported {} available {} units but selection found {}",
                available,
                category,
                selected.len()
            ),
        });
    }
    for unit_id in &selected {
        let still_available = inventory.get(unit_id).is_some_and(|u| u.is_available());
        if !still_available {
            return Err(EngineError::InventoryInconsistency {
                message: format!("selected unit {} is no longer available", unit_id),
            });
        }
    }

    let per_unit_fee = unit_price * Decimal::from(rounded.billed_units);

    // All preconditions hold; commit every unit and ledger entry.
    for unit_id in &selected {
        inventory.mark_rented(
            unit_id,
            request.contact.clone(),
            request.rented_at,
            rounded.booked_duration,
            estimated_return_at,
        )?;

        ledger.append(SalesTransaction {
            id: Uuid::new_v4(),
            kind: TransactionKind::Rental,
            category,
            unit_id: unit_id.clone(),
            unit_price,
            billing_unit_label: billing_unit.label().to_string(),
            timestamp: request.rented_at,
            amount: per_unit_fee,
            contact: Some(request.contact.clone()),
        });
    }

    Ok(RentalResult {
        category,
        unit_ids: selected,
        billed_units: rounded.billed_units,
        display_hours: rounded.display_hours,
        per_unit_fee,
        total_fee: per_unit_fee * Decimal::from(request.quantity),
        rented_at: request.rented_at,
        estimated_return_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn setup() -> (InventoryStore, SalesLedger, PricingTable) {
        let pricing = PricingTable::standard();
        let mut inventory = InventoryStore::new();
        inventory.insert(BikeCategory::Adult, &pricing, 3).unwrap();
        inventory.insert(BikeCategory::Pgk, &pricing, 2).unwrap();
        let ledger = SalesLedger::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        (inventory, ledger, pricing)
    }

    fn request(category: BikeCategory, hours: &str, quantity: u32) -> RentalRequest {
        RentalRequest {
            category,
            requested_hours: dec(hours),
            rented_at: make_datetime("2024-06-01 10:00:00"),
            contact: "91234567".to_string(),
            quantity,
        }
    }

    #[test]
    fn test_adult_two_hours_charges_sixteen() {
        let (mut inventory, mut ledger, pricing) = setup();

        let result = rent(
            &mut inventory,
            &mut ledger,
            &pricing,
            &request(BikeCategory::Adult, "2.0", 1),
        )
        .unwrap();

        assert_eq!(result.unit_ids, vec!["A001"]);
        assert_eq!(result.billed_units, 2);
        assert_eq!(result.per_unit_fee, dec("16"));
        assert_eq!(result.total_fee, dec("16"));
        assert_eq!(
            result.estimated_return_at,
            make_datetime("2024-06-01 12:00:00")
        );
    }

    #[test]
    fn test_pgk_fraction_rounds_to_one_half_hour_block() {
        let (mut inventory, mut ledger, pricing) = setup();

        let result = rent(
            &mut inventory,
            &mut ledger,
            &pricing,
            &request(BikeCategory::Pgk, "0.4", 1),
        )
        .unwrap();

        assert_eq!(result.billed_units, 1);
        assert_eq!(result.display_hours, dec("0.5"));
        assert_eq!(result.total_fee, dec("13"));
        assert_eq!(
            result.estimated_return_at,
            make_datetime("2024-06-01 10:30:00")
        );
    }

    #[test]
    fn test_multi_unit_rental_appends_one_transaction_per_unit() {
        let (mut inventory, mut ledger, pricing) = setup();

        let result = rent(
            &mut inventory,
            &mut ledger,
            &pricing,
            &request(BikeCategory::Adult, "1", 2),
        )
        .unwrap();

        assert_eq!(result.unit_ids, vec!["A001", "A002"]);
        assert_eq!(result.total_fee, dec("16"));
        assert_eq!(ledger.len(), 2);
        for transaction in ledger.transactions() {
            assert_eq!(transaction.kind, TransactionKind::Rental);
            assert_eq!(transaction.amount, dec("8"));
        }
        assert!(inventory.is_rented("A001"));
        assert!(inventory.is_rented("A002"));
        assert!(!inventory.is_rented("A003"));
    }

    #[test]
    fn test_insufficient_inventory_leaves_everything_unchanged() {
        let (mut inventory, mut ledger, pricing) = setup();

        let result = rent(
            &mut inventory,
            &mut ledger,
            &pricing,
            &request(BikeCategory::Adult, "1", 5),
        );

        match result {
            Err(EngineError::InsufficientInventory {
                requested,
                available,
                ..
            }) => {
                assert_eq!(requested, 5);
                assert_eq!(available, 3);
            }
            other => panic!("Expected InsufficientInventory, got {:?}", other),
        }
        assert_eq!(inventory.count_available(BikeCategory::Adult), 3);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_zero_quantity_and_nonpositive_hours_rejected() {
        let (mut inventory, mut ledger, pricing) = setup();

        assert!(matches!(
            rent(
                &mut inventory,
                &mut ledger,
                &pricing,
                &request(BikeCategory::Adult, "1", 0),
            ),
            Err(EngineError::InvalidRequest { .. })
        ));
        assert!(matches!(
            rent(
                &mut inventory,
                &mut ledger,
                &pricing,
                &request(BikeCategory::Adult, "0", 1),
            ),
            Err(EngineError::InvalidRequest { .. })
        ));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_rental_crossing_midnight_rejected() {
        let (mut inventory, mut ledger, pricing) = setup();

        let mut late = request(BikeCategory::Adult, "3", 1);
        late.rented_at = make_datetime("2024-06-01 22:30:00");

        let result = rent(&mut inventory, &mut ledger, &pricing, &late);
        assert!(matches!(result, Err(EngineError::InvalidRequest { .. })));
        assert_eq!(inventory.count_available(BikeCategory::Adult), 3);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_rental_ending_exactly_at_midnight_rejected() {
        let (mut inventory, mut ledger, pricing) = setup();

        let mut late = request(BikeCategory::Adult, "2", 1);
        late.rented_at = make_datetime("2024-06-01 22:00:00");

        // 22:00 + 2h lands on 00:00 the next day.
        let result = rent(&mut inventory, &mut ledger, &pricing, &late);
        assert!(matches!(result, Err(EngineError::InvalidRequest { .. })));
    }

    #[test]
    fn test_units_selected_in_ascending_serial_order() {
        let (mut inventory, mut ledger, pricing) = setup();
        inventory
            .mark_rented(
                "A001",
                "81111111".to_string(),
                make_datetime("2024-06-01 09:00:00"),
                dec("1"),
                make_datetime("2024-06-01 10:00:00"),
            )
            .unwrap();

        let result = rent(
            &mut inventory,
            &mut ledger,
            &pricing,
            &request(BikeCategory::Adult, "1", 2),
        )
        .unwrap();

        assert_eq!(result.unit_ids, vec!["A002", "A003"]);
    }
}
