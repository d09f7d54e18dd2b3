use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use fx_core::process::ConversionContext;
use fx_core::settings::settings;
use fx_core::store::{
    now_ms, set_target_currency, target_currency, FileStore, RateSnapshot, StoreError,
};
use fx_core::RateTable;

use super::{FxConversionReport, FxError, FxRateSnapshot};

impl From<StoreError> for FxError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Io(_) => FxError::Io { msg: e.to_string() },
            _ => FxError::InvalidData { msg: e.to_string() },
        }
    }
}

/// Persistent settings: target currency and the cached rate snapshot.
#[derive(uniffi::Object)]
pub struct FxStore {
    pub(crate) inner: FileStore,
}

#[uniffi::export]
impl FxStore {
    #[uniffi::constructor]
    pub fn open(path: String) -> Result<Arc<Self>, FxError> {
        let inner = FileStore::open(Path::new(&path)).map_err(FxError::from)?;
        Ok(Arc::new(Self { inner }))
    }

    pub fn target_currency(&self) -> Option<String> {
        target_currency(&self.inner)
    }

    pub fn set_target_currency(&self, code: String) -> Result<(), FxError> {
        Ok(set_target_currency(&self.inner, &code)?)
    }

    /// Cached rates with staleness judged against `rates.max_age_hours`.
    pub fn cached_rates(&self) -> Option<FxRateSnapshot> {
        let snapshot = RateSnapshot::load(&self.inner)?;
        let stale = snapshot.is_stale(now_ms(), settings().rates.max_age_ms());
        Some(FxRateSnapshot {
            rates: BTreeMap::from(snapshot.rates).into_iter().collect(),
            last_updated_ms: snapshot.last_updated_ms,
            stale,
        })
    }

    /// Replace the cached rates, stamped with the current time.
    pub fn save_rates(&self, rates: HashMap<String, f64>) -> Result<(), FxError> {
        let rates = RateTable::from_pairs(rates);
        if rates.is_empty() {
            return Err(FxError::InvalidData {
                msg: "no usable rates".to_string(),
            });
        }
        let snapshot = RateSnapshot {
            rates,
            last_updated_ms: now_ms(),
        };
        Ok(snapshot.save(&self.inner)?)
    }

    /// Convert with the stored target and cached rates. Empty report when
    /// no target is stored.
    pub fn convert_text(&self, text: String) -> FxConversionReport {
        match ConversionContext::from_store(&self.inner) {
            Some(ctx) => super::report(&text, &ctx),
            None => FxConversionReport {
                results: Vec::new(),
                summary: String::new(),
            },
        }
    }
}
