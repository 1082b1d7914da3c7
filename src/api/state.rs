//! Application state for the rental shop API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::storage::{ShopState, ShopStorage};

/// Shared application state.
///
/// Holds the loaded shop configuration, the storage handle, and the
/// open business day's inventory and ledger behind a lock. Handlers
/// take the write half for mutations and persist through the storage
/// handle before responding.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    storage: Arc<ShopStorage>,
    shop: Arc<RwLock<ShopState>>,
}

impl AppState {
    /// Opens a business day and wraps it in shared state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::StorageFailure`] when the
    /// day's state cannot be loaded.
    pub fn open(config: ConfigLoader, storage: ShopStorage, date: NaiveDate) -> EngineResult<Self> {
        let shop = storage.open_day(date)?;
        Ok(Self {
            config: Arc::new(config),
            storage: Arc::new(storage),
            shop: Arc::new(RwLock::new(shop)),
        })
    }

    /// Returns a reference to the shop configuration.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns a reference to the storage handle.
    pub fn storage(&self) -> &ShopStorage {
        &self.storage
    }

    /// Returns the lock guarding the open day's inventory and ledger.
    pub fn shop(&self) -> &RwLock<ShopState> {
        &self.shop
    }
}
