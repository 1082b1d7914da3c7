//! JSON persistence for the shop's state.
//!
//! The inventory lives in a single `bicycles.json` snapshot that
//! persists across days; each business day's ledger lives in its own
//! `sales_<yyyymmdd>.json` file. Both follow load-or-create semantics:
//! a missing file yields empty, schema-valid state rather than an
//! error.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::inventory::InventoryStore;
use crate::ledger::SalesLedger;

/// The inventory and ledger for one open business day.
#[derive(Debug, Clone)]
pub struct ShopState {
    /// The shop's bicycle inventory.
    pub inventory: InventoryStore,
    /// The day's sales ledger.
    pub ledger: SalesLedger,
}

impl ShopState {
    /// Borrows the inventory and ledger disjointly, for engine calls
    /// that mutate both.
    pub fn split_mut(&mut self) -> (&mut InventoryStore, &mut SalesLedger) {
        (&mut self.inventory, &mut self.ledger)
    }
}

/// File-backed persistence for a single shop's data directory.
#[derive(Debug, Clone)]
pub struct ShopStorage {
    data_dir: PathBuf,
}

impl ShopStorage {
    /// Creates a storage handle over a data directory, creating the
    /// directory when absent.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StorageFailure`] when the directory cannot
    /// be created.
    pub fn new(data_dir: impl Into<PathBuf>) -> EngineResult<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir).map_err(|e| EngineError::StorageFailure {
            path: data_dir.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { data_dir })
    }

    /// Returns the data directory this storage writes under.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn inventory_path(&self) -> PathBuf {
        self.data_dir.join("bicycles.json")
    }

    fn ledger_path(&self, date: NaiveDate) -> PathBuf {
        self.data_dir
            .join(format!("sales_{}.json", date.format("%Y%m%d")))
    }

    /// Opens a business day: loads the persisted inventory and the
    /// day's ledger.
    ///
    /// When no ledger file exists for the date yet, a new day begins:
    /// every bicycle still marked rented from a previous day is reset to
    /// available, an empty ledger is created, and both are persisted
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StorageFailure`] on unreadable or
    /// unparsable files.
    pub fn open_day(&self, date: NaiveDate) -> EngineResult<ShopState> {
        let mut inventory: InventoryStore =
            load_or_default(&self.inventory_path())?.unwrap_or_default();

        match load_or_default::<SalesLedger>(&self.ledger_path(date))? {
            Some(ledger) => Ok(ShopState { inventory, ledger }),
            None => {
                info!(date = %date, "opening new business day");
                inventory.reset_daily();
                let ledger = SalesLedger::new(date);
                let state = ShopState { inventory, ledger };
                self.save(&state)?;
                Ok(state)
            }
        }
    }

    /// Persists both the inventory snapshot and the day's ledger.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StorageFailure`] when either file cannot
    /// be written.
    pub fn save(&self, state: &ShopState) -> EngineResult<()> {
        write_json(&self.inventory_path(), &state.inventory)?;
        write_json(&self.ledger_path(state.ledger.date()), &state.ledger)
    }
}

fn load_or_default<T: DeserializeOwned>(path: &Path) -> EngineResult<Option<T>> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(EngineError::StorageFailure {
                path: path.display().to_string(),
                message: e.to_string(),
            });
        }
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| EngineError::StorageFailure {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> EngineResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| EngineError::StorageFailure {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    std::fs::write(path, json).map_err(|e| EngineError::StorageFailure {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PricingTable;
    use crate::models::BikeCategory;
    use chrono::NaiveDateTime;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn rent_unit(inventory: &mut InventoryStore, unit_id: &str) {
        inventory
            .mark_rented(
                unit_id,
                "91234567".to_string(),
                NaiveDateTime::parse_from_str("2024-06-01 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
                Decimal::from_str("2").unwrap(),
                NaiveDateTime::parse_from_str("2024-06-01 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
            )
            .unwrap();
    }

    #[test]
    fn test_open_day_with_empty_directory_creates_fresh_state() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ShopStorage::new(dir.path()).unwrap();

        let state = storage.open_day(date("2024-06-01")).unwrap();

        assert!(state.inventory.is_empty());
        assert!(state.ledger.is_empty());
        assert_eq!(state.ledger.date(), date("2024-06-01"));
        // Both files are persisted immediately.
        assert!(dir.path().join("bicycles.json").exists());
        assert!(dir.path().join("sales_20240601.json").exists());
    }

    #[test]
    fn test_save_and_reopen_same_day_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ShopStorage::new(dir.path()).unwrap();
        let pricing = PricingTable::standard();

        let mut state = storage.open_day(date("2024-06-01")).unwrap();
        state
            .inventory
            .insert(BikeCategory::Adult, &pricing, 2)
            .unwrap();
        rent_unit(&mut state.inventory, "A001");
        storage.save(&state).unwrap();

        let reopened = storage.open_day(date("2024-06-01")).unwrap();
        assert_eq!(reopened.inventory.len(), 2);
        // Same day: the rental survives the reload.
        assert!(reopened.inventory.is_rented("A001"));
    }

    #[test]
    fn test_new_day_resets_stale_rentals() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ShopStorage::new(dir.path()).unwrap();
        let pricing = PricingTable::standard();

        let mut state = storage.open_day(date("2024-06-01")).unwrap();
        state
            .inventory
            .insert(BikeCategory::Adult, &pricing, 2)
            .unwrap();
        rent_unit(&mut state.inventory, "A001");
        storage.save(&state).unwrap();

        let next_day = storage.open_day(date("2024-06-02")).unwrap();
        assert!(!next_day.inventory.is_rented("A001"));
        assert_eq!(next_day.inventory.count_available(BikeCategory::Adult), 2);
        assert!(next_day.ledger.is_empty());

        // The reset is persisted, not just in memory.
        let reloaded = storage.open_day(date("2024-06-02")).unwrap();
        assert!(!reloaded.inventory.is_rented("A001"));
    }

    #[test]
    fn test_corrupt_inventory_file_surfaces_storage_failure() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ShopStorage::new(dir.path()).unwrap();
        std::fs::write(dir.path().join("bicycles.json"), "not json").unwrap();

        let result = storage.open_day(date("2024-06-01"));
        assert!(matches!(result, Err(EngineError::StorageFailure { .. })));
    }
}
