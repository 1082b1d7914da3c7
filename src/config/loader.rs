//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the shop
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::BillingUnit;

use super::types::{CategoryPricing, PricingConfig, PricingTable, RawCategoryPricing, ShopMetadata};

/// Loads and provides access to the shop configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// provides the validated pricing table used by the rental and return
/// engines.
///
/// # Directory Structure
///
/// ```text
/// config/shop/
/// ├── shop.yaml     # Shop metadata
/// └── pricing.yaml  # Per-category unit prices and billing granularity
/// ```
///
/// # Example
///
/// ```no_run
/// use rental_engine::config::ConfigLoader;
/// use rental_engine::models::BikeCategory;
///
/// let loader = ConfigLoader::load("./config/shop").unwrap();
/// let pricing = loader.pricing().price_of(BikeCategory::Adult);
/// println!("Adult bikes: ${} {}", pricing.unit_price, pricing.billing_unit.label());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    metadata: ShopMetadata,
    pricing: PricingTable,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either file is missing (`ConfigNotFound`)
    /// - Either file contains invalid YAML or a missing category
    ///   (`ConfigParseError`)
    /// - A category uses a billing granularity other than 60 or 30
    ///   minutes (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let shop_path = path.join("shop.yaml");
        let metadata = Self::load_yaml::<ShopMetadata>(&shop_path)?;

        let pricing_path = path.join("pricing.yaml");
        let pricing_config = Self::load_yaml::<PricingConfig>(&pricing_path)?;
        let pricing = Self::validate_pricing(&pricing_path, pricing_config)?;

        Ok(Self { metadata, pricing })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Validates raw pricing entries into the typed pricing table.
    fn validate_pricing(path: &Path, config: PricingConfig) -> EngineResult<PricingTable> {
        let convert = |code: &str, raw: RawCategoryPricing| -> EngineResult<CategoryPricing> {
            let billing_unit = BillingUnit::from_minutes(raw.billing_minutes).ok_or_else(|| {
                EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!(
                        "category '{}' has unsupported billing_minutes {} (expected 60 or 30)",
                        code, raw.billing_minutes
                    ),
                }
            })?;
            Ok(CategoryPricing {
                unit_price: raw.unit_price,
                billing_unit,
            })
        };

        let entries = config.categories;
        Ok(PricingTable::new(
            convert("adult", entries.adult)?,
            convert("kid", entries.kid)?,
            convert("tandem", entries.tandem)?,
            convert("family", entries.family)?,
            convert("pgk", entries.pgk)?,
        ))
    }

    /// Returns the shop metadata.
    pub fn shop(&self) -> &ShopMetadata {
        &self.metadata
    }

    /// Returns the validated pricing table.
    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }
}
