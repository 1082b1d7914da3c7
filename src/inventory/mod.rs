//! The bicycle inventory store.
//!
//! An ordered collection of [`BicycleUnit`] records keyed by serial
//! number. The store is created once per shop and persists across days;
//! rental status is reset at each day boundary via [`InventoryStore::reset_daily`].
//!
//! All mutating operations validate their preconditions before touching
//! any record, so a failed operation leaves the store exactly as it was.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PricingTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{BicycleUnit, BikeCategory, UnitStatus};

/// The shop's bicycle inventory, keyed by serial number.
///
/// Iteration order is ascending by serial number, which makes unit
/// selection for rentals deterministic and reproducible.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryStore {
    units: BTreeMap<String, BicycleUnit>,
}

impl InventoryStore {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of units across all categories.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns true when the inventory holds no units.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Looks up a unit by serial number.
    pub fn get(&self, unit_id: &str) -> Option<&BicycleUnit> {
        self.units.get(unit_id)
    }

    /// Iterates all units in ascending serial-number order.
    pub fn units(&self) -> impl Iterator<Item = &BicycleUnit> {
        self.units.values()
    }

    /// Lists units matching the optional category and status filters, in
    /// ascending serial-number order.
    pub fn list(
        &self,
        category: Option<BikeCategory>,
        status: Option<UnitStatus>,
    ) -> Vec<&BicycleUnit> {
        self.units
            .values()
            .filter(|u| category.is_none_or(|c| u.category == c))
            .filter(|u| status.is_none_or(|s| u.status == s))
            .collect()
    }

    /// Counts the available units of a category.
    pub fn count_available(&self, category: BikeCategory) -> u32 {
        self.count_with_status(category, UnitStatus::Available)
    }

    /// Counts the rented units of a category.
    pub fn count_rented(&self, category: BikeCategory) -> u32 {
        self.count_with_status(category, UnitStatus::Rented)
    }

    /// Counts all units of a category regardless of status.
    pub fn total(&self, category: BikeCategory) -> u32 {
        self.units.values().filter(|u| u.category == category).count() as u32
    }

    fn count_with_status(&self, category: BikeCategory, status: UnitStatus) -> u32 {
        self.units
            .values()
            .filter(|u| u.category == category && u.status == status)
            .count() as u32
    }

    /// Returns up to `n` available serial numbers of a category, in
    /// ascending order.
    pub fn find_available(&self, category: BikeCategory, n: u32) -> Vec<String> {
        self.units
            .values()
            .filter(|u| u.category == category && u.is_available())
            .take(n as usize)
            .map(|u| u.id.clone())
            .collect()
    }

    /// Returns true when the unit exists and is currently rented.
    pub fn is_rented(&self, unit_id: &str) -> bool {
        self.units.get(unit_id).is_some_and(|u| u.is_rented())
    }

    /// Adds `quantity` new units of a category, continuing the
    /// per-category serial number sequence.
    ///
    /// New serial numbers are the category initial plus a zero-padded
    /// 3-digit count (`K001`, `K002`, ...), independent of other
    /// categories' counts. Returns the new serial numbers.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRequest`] when `quantity` is zero.
    pub fn insert(
        &mut self,
        category: BikeCategory,
        pricing: &PricingTable,
        quantity: u32,
    ) -> EngineResult<Vec<String>> {
        if quantity == 0 {
            return Err(EngineError::InvalidRequest {
                field: "quantity".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let category_pricing = pricing.price_of(category);
        let mut existing = self.total(category);
        let mut new_ids = Vec::with_capacity(quantity as usize);

        for _ in 0..quantity {
            existing += 1;
            let id = format!("{}{:03}", category.initial(), existing);
            let unit = BicycleUnit::new(
                id.clone(),
                category,
                category_pricing.unit_price,
                category_pricing.billing_unit,
            );
            self.units.insert(id.clone(), unit);
            new_ids.push(id);
        }

        Ok(new_ids)
    }

    /// Marks a unit as rented and records the rental details.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnitNotFound`] when the serial number does
    /// not exist, or [`EngineError::UnitNotAvailable`] when the unit is
    /// already out.
    pub fn mark_rented(
        &mut self,
        unit_id: &str,
        contact: String,
        rented_at: NaiveDateTime,
        booked_duration: Decimal,
        estimated_return_at: NaiveDateTime,
    ) -> EngineResult<()> {
        let unit = self
            .units
            .get_mut(unit_id)
            .ok_or_else(|| EngineError::UnitNotFound {
                unit_id: unit_id.to_string(),
            })?;

        if !unit.is_available() {
            return Err(EngineError::UnitNotAvailable {
                unit_id: unit_id.to_string(),
            });
        }

        unit.rent_out(contact, rented_at, booked_duration, estimated_return_at);
        Ok(())
    }

    /// Marks a unit as returned, resetting all rental fields to their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnitNotFound`] when the serial number does
    /// not exist, or [`EngineError::UnitNotRented`] when the unit is not
    /// currently out.
    pub fn mark_returned(&mut self, unit_id: &str) -> EngineResult<()> {
        let unit = self
            .units
            .get_mut(unit_id)
            .ok_or_else(|| EngineError::UnitNotFound {
                unit_id: unit_id.to_string(),
            })?;

        if !unit.is_rented() {
            return Err(EngineError::UnitNotRented {
                unit_id: unit_id.to_string(),
            });
        }

        unit.return_to_shop();
        Ok(())
    }

    /// Resets every unit to available with no rental details.
    ///
    /// Called at the day boundary, when a new business day's ledger is
    /// opened.
    pub fn reset_daily(&mut self) {
        for unit in self.units.values_mut() {
            if unit.is_rented() {
                unit.return_to_shop();
            }
        }
    }
}
