mod open_er_api;

use fx_core::store::{cached_rates, RateSnapshot, SettingsStore, StoreError};
use fx_core::RateTable;

pub use open_er_api::{parse_response, OpenErApiSource};

/// A place published exchange rates can be fetched from.
pub trait RateSource {
    /// Fetch the current rate table (units per one pivot unit).
    fn fetch(&self) -> Result<RateTable, RateSourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RateSourceError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
    /// Cached rates are younger than the max age; nothing fetched.
    Fresh,
    Updated { count: usize },
    /// Fetch failed; whatever was cached stays in place.
    Failed { reason: String, kept_cached: bool },
}

/// Fetch and cache new rates when the cached snapshot is missing or older
/// than `max_age_ms`. A failed fetch is reported, not propagated; only a
/// failure to write the store is an error.
pub fn refresh_if_stale(
    store: &dyn SettingsStore,
    source: &dyn RateSource,
    now_ms: u64,
    max_age_ms: u64,
) -> Result<Refresh, RateSourceError> {
    let cached = RateSnapshot::load(store);
    if let Some(snapshot) = &cached {
        if !snapshot.is_stale(now_ms, max_age_ms) {
            return Ok(Refresh::Fresh);
        }
    }

    match source.fetch() {
        Ok(rates) => {
            let count = rates.len();
            RateSnapshot {
                rates,
                last_updated_ms: now_ms,
            }
            .save(store)?;
            Ok(Refresh::Updated { count })
        }
        Err(e) => Ok(Refresh::Failed {
            reason: e.to_string(),
            kept_cached: cached_rates(store).is_some(),
        }),
    }
}
