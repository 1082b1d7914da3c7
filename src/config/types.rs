//! Configuration types for the rental shop.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the validated
//! pricing table built from them.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{BikeCategory, BillingUnit};

/// Metadata about the shop.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopMetadata {
    /// The human-readable name of the shop.
    pub name: String,
    /// The currency symbol used on receipts and reports (e.g. "S$").
    pub currency: String,
    /// The version or effective date of the price list.
    pub version: String,
}

/// Price and billing granularity for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPricing {
    /// Price per billing unit.
    pub unit_price: Decimal,
    /// Billing granularity (hourly or half-hourly).
    pub billing_unit: BillingUnit,
}

/// Raw per-category entry as it appears in `pricing.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCategoryPricing {
    /// Price per billing unit.
    pub unit_price: Decimal,
    /// Billing block length in minutes; must be 60 or 30.
    pub billing_minutes: u32,
}

/// Per-category entries in `pricing.yaml`.
///
/// Every category in the closed set must be present; a missing entry is
/// a parse error.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPricingEntries {
    /// Pricing for adult bicycles.
    pub adult: RawCategoryPricing,
    /// Pricing for kid bicycles.
    pub kid: RawCategoryPricing,
    /// Pricing for tandem bicycles.
    pub tandem: RawCategoryPricing,
    /// Pricing for family bicycles.
    pub family: RawCategoryPricing,
    /// Pricing for PGK bicycles.
    pub pgk: RawCategoryPricing,
}

/// Pricing configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// Map of category code to pricing.
    pub categories: RawPricingEntries,
}

/// The validated pricing table for the shop.
///
/// Maps every category in the closed set to exactly one unit price and
/// billing granularity. Construction validates the billing granularity,
/// so lookups are total.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingTable {
    adult: CategoryPricing,
    kid: CategoryPricing,
    tandem: CategoryPricing,
    family: CategoryPricing,
    pgk: CategoryPricing,
}

impl PricingTable {
    /// Creates a pricing table from one entry per category.
    pub fn new(
        adult: CategoryPricing,
        kid: CategoryPricing,
        tandem: CategoryPricing,
        family: CategoryPricing,
        pgk: CategoryPricing,
    ) -> Self {
        Self {
            adult,
            kid,
            tandem,
            family,
            pgk,
        }
    }

    /// Returns the shop's standard price list.
    ///
    /// Hourly: adult 8, kid 6, tandem 16, family 35. Half-hourly: pgk 13.
    /// Matches the shipped `config/shop/pricing.yaml`.
    pub fn standard() -> Self {
        let hourly = |price: i64| CategoryPricing {
            unit_price: Decimal::from(price),
            billing_unit: BillingUnit::Hourly,
        };
        Self {
            adult: hourly(8),
            kid: hourly(6),
            tandem: hourly(16),
            family: hourly(35),
            pgk: CategoryPricing {
                unit_price: Decimal::from(13),
                billing_unit: BillingUnit::HalfHourly,
            },
        }
    }

    /// Looks up the pricing for a category.
    pub fn price_of(&self, category: BikeCategory) -> &CategoryPricing {
        match category {
            BikeCategory::Adult => &self.adult,
            BikeCategory::Kid => &self.kid,
            BikeCategory::Tandem => &self.tandem,
            BikeCategory::Family => &self.family,
            BikeCategory::Pgk => &self.pgk,
        }
    }

    /// Returns the unit price for a category.
    pub fn unit_price(&self, category: BikeCategory) -> Decimal {
        self.price_of(category).unit_price
    }

    /// Returns the billing granularity for a category.
    pub fn billing_unit(&self, category: BikeCategory) -> BillingUnit {
        self.price_of(category).billing_unit
    }
}
