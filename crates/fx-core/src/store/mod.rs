//! Key-value settings store the host persists preferences and cached rates
//! in, plus the snapshot helpers that turn its contents into a
//! [`ConversionContext`](crate::process::ConversionContext).

mod file;
mod snapshot;

use std::collections::BTreeMap;
use std::io;
use std::sync::{PoisonError, RwLock};

use serde_json::Value;

pub use file::FileStore;
pub use snapshot::{cached_rates, now_ms, set_target_currency, target_currency, RateSnapshot};

/// Preferred target currency code (string).
pub const KEY_DEFAULT_CURRENCY: &str = "defaultCurrency";
/// Cached rate table (object, code → number).
pub const KEY_EXCHANGE_RATES: &str = "exchangeRates";
/// Time the cached rates were fetched (Unix milliseconds).
pub const KEY_LAST_UPDATED: &str = "lastUpdated";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("store data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store root must be a JSON object")]
    NotAnObject,
}

pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
}

/// In-process store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        let map = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        map.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut map = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(key.to_string(), value);
        Ok(())
    }
}
