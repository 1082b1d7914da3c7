//! Shop configuration: metadata and the pricing table.
//!
//! The pricing table maps each bicycle category to a unit price and
//! billing granularity. It is loaded from YAML files in the manner of
//! [`ConfigLoader::load`], or built in code via
//! [`PricingTable::standard`].

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CategoryPricing, PricingConfig, PricingTable, RawCategoryPricing, RawPricingEntries,
    ShopMetadata,
};
