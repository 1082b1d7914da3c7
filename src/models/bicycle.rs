//! Bicycle model and related types.
//!
//! This module defines the bicycle category, billing unit, and the
//! per-unit inventory record used throughout the rental engine.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The closed set of bicycle categories offered by the shop.
///
/// Each category maps to exactly one unit price and billing granularity
/// via the pricing table. The set is fixed: parsing any other name fails
/// with [`EngineError::UnknownCategory`].
///
/// # Example
///
/// ```
/// use rental_engine::models::BikeCategory;
///
/// let category = BikeCategory::parse("Adult").unwrap();
/// assert_eq!(category, BikeCategory::Adult);
/// assert_eq!(category.code(), "adult");
/// assert_eq!(category.initial(), 'A');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BikeCategory {
    /// Standard adult bicycle.
    Adult,
    /// Children's bicycle.
    Kid,
    /// Two-seater tandem bicycle.
    Tandem,
    /// Family bicycle (multiple riders).
    Family,
    /// PGK bicycle, billed in half-hour blocks.
    Pgk,
}

impl BikeCategory {
    /// All categories, in pricing-table order.
    pub const ALL: [BikeCategory; 5] = [
        BikeCategory::Adult,
        BikeCategory::Kid,
        BikeCategory::Tandem,
        BikeCategory::Family,
        BikeCategory::Pgk,
    ];

    /// Returns the lowercase category code used in configuration and
    /// persisted records.
    pub fn code(&self) -> &'static str {
        match self {
            BikeCategory::Adult => "adult",
            BikeCategory::Kid => "kid",
            BikeCategory::Tandem => "tandem",
            BikeCategory::Family => "family",
            BikeCategory::Pgk => "pgk",
        }
    }

    /// Returns the uppercase initial used as the serial number prefix.
    pub fn initial(&self) -> char {
        match self {
            BikeCategory::Adult => 'A',
            BikeCategory::Kid => 'K',
            BikeCategory::Tandem => 'T',
            BikeCategory::Family => 'F',
            BikeCategory::Pgk => 'P',
        }
    }

    /// Parses a category from its name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownCategory`] when the name is not one
    /// of the five supported categories.
    pub fn parse(name: &str) -> EngineResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "adult" => Ok(BikeCategory::Adult),
            "kid" => Ok(BikeCategory::Kid),
            "tandem" => Ok(BikeCategory::Tandem),
            "family" => Ok(BikeCategory::Family),
            "pgk" => Ok(BikeCategory::Pgk),
            other => Err(EngineError::UnknownCategory {
                category: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for BikeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.code())
    }
}

/// The minimum chargeable time block for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingUnit {
    /// Billed in whole-hour blocks.
    Hourly,
    /// Billed in half-hour blocks.
    HalfHourly,
}

impl BillingUnit {
    /// Constructs a billing unit from a block length in minutes.
    ///
    /// Only 60-minute and 30-minute blocks are supported.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        match minutes {
            60 => Some(BillingUnit::Hourly),
            30 => Some(BillingUnit::HalfHourly),
            _ => None,
        }
    }

    /// Returns the block length in minutes (60 or 30).
    pub fn minutes(&self) -> i64 {
        match self {
            BillingUnit::Hourly => 60,
            BillingUnit::HalfHourly => 30,
        }
    }

    /// Returns the display label attached to prices in this unit.
    pub fn label(&self) -> &'static str {
        match self {
            BillingUnit::Hourly => "per hour",
            BillingUnit::HalfHourly => "per 0.5 hour",
        }
    }

    /// Converts a billed block count into hours for display.
    ///
    /// Half-hour blocks are presented in hours format, so 3 blocks show
    /// as 1.5 hours.
    pub fn display_hours(&self, units: u32) -> Decimal {
        match self {
            BillingUnit::Hourly => Decimal::from(units),
            BillingUnit::HalfHourly => Decimal::from(units) / Decimal::from(2),
        }
    }
}

/// Whether a bicycle is in the shop or out with a renter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    /// In the shop, rentable.
    Available,
    /// Out with a renter.
    Rented,
}

/// A single bicycle in the shop's inventory.
///
/// The serial number, category, price, and billing unit are assigned at
/// creation and never change. The remaining fields track the current
/// rental: an `Available` unit has no contact, no timestamps, and a zero
/// booked duration; a `Rented` unit has all of them set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BicycleUnit {
    /// Serial number: category initial plus a zero-padded 3-digit
    /// per-category sequence (e.g. "A001").
    pub id: String,
    /// The bicycle's category.
    pub category: BikeCategory,
    /// Price per billing unit, fixed at creation from the pricing table.
    pub unit_price: Decimal,
    /// Billing granularity, fixed at creation from the pricing table.
    pub billing_unit: BillingUnit,
    /// Current rental status.
    pub status: UnitStatus,
    /// Renter contact number, set while rented.
    #[serde(default)]
    pub contact: Option<String>,
    /// When the unit left the shop, set while rented.
    #[serde(default)]
    pub rented_at: Option<NaiveDateTime>,
    /// Booked duration in hours. Hourly categories record the rounded
    /// integer; half-hourly categories record the unrounded request.
    pub booked_duration: Decimal,
    /// When the unit is due back, set while rented.
    #[serde(default)]
    pub estimated_return_at: Option<NaiveDateTime>,
}

impl BicycleUnit {
    /// Creates a new available unit with the given serial number and
    /// pricing.
    pub fn new(id: String, category: BikeCategory, unit_price: Decimal, billing_unit: BillingUnit) -> Self {
        Self {
            id,
            category,
            unit_price,
            billing_unit,
            status: UnitStatus::Available,
            contact: None,
            rented_at: None,
            booked_duration: Decimal::ZERO,
            estimated_return_at: None,
        }
    }

    /// Returns true when the unit is in the shop and rentable.
    pub fn is_available(&self) -> bool {
        self.status == UnitStatus::Available
    }

    /// Returns true when the unit is out with a renter.
    pub fn is_rented(&self) -> bool {
        self.status == UnitStatus::Rented
    }

    /// Returns the display label for this unit's price.
    pub fn billing_unit_label(&self) -> &'static str {
        self.billing_unit.label()
    }

    /// Sets the rental fields and flips the status to `Rented`.
    pub(crate) fn rent_out(
        &mut self,
        contact: String,
        rented_at: NaiveDateTime,
        booked_duration: Decimal,
        estimated_return_at: NaiveDateTime,
    ) {
        self.status = UnitStatus::Rented;
        self.contact = Some(contact);
        self.rented_at = Some(rented_at);
        self.booked_duration = booked_duration;
        self.estimated_return_at = Some(estimated_return_at);
    }

    /// Clears the rental fields and flips the status back to `Available`.
    pub(crate) fn return_to_shop(&mut self) {
        self.status = UnitStatus::Available;
        self.contact = None;
        self.rented_at = None;
        self.booked_duration = Decimal::ZERO;
        self.estimated_return_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_accepts_all_categories_case_insensitively() {
        assert_eq!(BikeCategory::parse("adult").unwrap(), BikeCategory::Adult);
        assert_eq!(BikeCategory::parse("Kid").unwrap(), BikeCategory::Kid);
        assert_eq!(BikeCategory::parse("TANDEM").unwrap(), BikeCategory::Tandem);
        assert_eq!(BikeCategory::parse(" family ").unwrap(), BikeCategory::Family);
        assert_eq!(BikeCategory::parse("PGK").unwrap(), BikeCategory::Pgk);
    }

    #[test]
    fn test_parse_unknown_category_returns_error() {
        let result = BikeCategory::parse("cargo");
        match result {
            Err(crate::error::EngineError::UnknownCategory { category }) => {
                assert_eq!(category, "cargo");
            }
            other => panic!("Expected UnknownCategory, got {:?}", other),
        }
    }

    #[test]
    fn test_category_initials() {
        let initials: Vec<char> = BikeCategory::ALL.iter().map(|c| c.initial()).collect();
        assert_eq!(initials, vec!['A', 'K', 'T', 'F', 'P']);
    }

    #[test]
    fn test_category_serde_uses_lowercase_codes() {
        let json = serde_json::to_string(&BikeCategory::Pgk).unwrap();
        assert_eq!(json, "\"pgk\"");

        let category: BikeCategory = serde_json::from_str("\"tandem\"").unwrap();
        assert_eq!(category, BikeCategory::Tandem);
    }

    #[test]
    fn test_billing_unit_from_minutes() {
        assert_eq!(BillingUnit::from_minutes(60), Some(BillingUnit::Hourly));
        assert_eq!(BillingUnit::from_minutes(30), Some(BillingUnit::HalfHourly));
        assert_eq!(BillingUnit::from_minutes(45), None);
    }

    #[test]
    fn test_billing_unit_labels() {
        assert_eq!(BillingUnit::Hourly.label(), "per hour");
        assert_eq!(BillingUnit::HalfHourly.label(), "per 0.5 hour");
    }

    #[test]
    fn test_display_hours_for_half_hour_blocks() {
        assert_eq!(BillingUnit::HalfHourly.display_hours(1), dec("0.5"));
        assert_eq!(BillingUnit::HalfHourly.display_hours(3), dec("1.5"));
        assert_eq!(BillingUnit::Hourly.display_hours(2), dec("2"));
    }

    #[test]
    fn test_new_unit_is_available_with_clear_rental_fields() {
        let unit = BicycleUnit::new(
            "A001".to_string(),
            BikeCategory::Adult,
            dec("8"),
            BillingUnit::Hourly,
        );

        assert!(unit.is_available());
        assert!(unit.contact.is_none());
        assert!(unit.rented_at.is_none());
        assert!(unit.estimated_return_at.is_none());
        assert_eq!(unit.booked_duration, Decimal::ZERO);
        assert_eq!(unit.billing_unit_label(), "per hour");
    }

    #[test]
    fn test_rent_out_and_return_round_trip_restores_invariant() {
        let mut unit = BicycleUnit::new(
            "P001".to_string(),
            BikeCategory::Pgk,
            dec("13"),
            BillingUnit::HalfHourly,
        );

        let rented_at = NaiveDateTime::parse_from_str("2024-06-01 10:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        let due_back = rented_at + chrono::Duration::minutes(30);
        unit.rent_out("91234567".to_string(), rented_at, dec("0.4"), due_back);

        assert!(unit.is_rented());
        assert_eq!(unit.contact.as_deref(), Some("91234567"));
        assert_eq!(unit.booked_duration, dec("0.4"));
        assert_eq!(unit.estimated_return_at, Some(due_back));

        unit.return_to_shop();
        assert!(unit.is_available());
        assert!(unit.contact.is_none());
        assert!(unit.rented_at.is_none());
        assert!(unit.estimated_return_at.is_none());
        assert_eq!(unit.booked_duration, Decimal::ZERO);
    }

    #[test]
    fn test_unit_serialization_round_trip() {
        let unit = BicycleUnit::new(
            "F002".to_string(),
            BikeCategory::Family,
            dec("35"),
            BillingUnit::Hourly,
        );

        let json = serde_json::to_string(&unit).unwrap();
        let deserialized: BicycleUnit = serde_json::from_str(&json).unwrap();
        assert_eq!(unit, deserialized);
    }
}
